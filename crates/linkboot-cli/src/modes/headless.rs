//! Headless playback: the boot log goes to stdout line by line.
//!
//! Ctrl+C cancels the session (and the redirect that would follow) and
//! exits with status 130.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::style::{StyledContent, Stylize};
use linkboot_core::script::{self, CONNECTING_SUBTITLE, CONNECTING_TITLE, FOOTER, HEADER};
use linkboot_core::{Config, Destination, interrupt};
use linkboot_engine::{Category, DisplayLine, PlaybackEngine};
use tokio::sync::mpsc;
use tracing::{info, warn};

const BAR_WIDTH: usize = 40;

pub struct HeadlessOptions<'a> {
    pub config: &'a Config,
    pub destination: &'a Destination,
    pub open_browser: bool,
}

enum Progress {
    Tick { revealed: usize, progress: f64 },
    Draining,
    Completed,
}

fn styled(line: &DisplayLine) -> StyledContent<&str> {
    let text = line.text.as_str();
    match line.category {
        Category::Ok => text.green(),
        Category::Warning => text.yellow(),
        Category::Error => text.red(),
        Category::Info => text.cyan(),
        Category::Plain => text.stylize(),
    }
}

fn progress_bar(progress: f64, ceiling: f64) -> String {
    let ratio = if ceiling > 0.0 {
        (progress / ceiling).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (ratio * BAR_WIDTH as f64).round() as usize;
    format!(
        "[{}{}] {:>3.0}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        ratio * 100.0
    )
}

/// Plays the boot script for the destination, then waits out the connect
/// delay and redirects.
///
/// # Errors
/// Returns `InterruptedError` on Ctrl+C, or an error if the timing is
/// invalid or stdout can't be written.
pub async fn run(options: HeadlessOptions<'_>) -> Result<()> {
    play(options, &mut io::stdout().lock()).await
}

async fn play<W: Write>(options: HeadlessOptions<'_>, out: &mut W) -> Result<()> {
    let HeadlessOptions {
        config,
        destination,
        open_browser,
    } = options;
    let lines = script::boot_script(destination);
    let ceiling = config.boot.progress_ceiling;
    let (tx, mut rx) = mpsc::unbounded_channel();

    let mut engine = PlaybackEngine::new(config.boot.timing());
    if let Some(seed) = config.seed {
        engine = engine.with_seed(seed);
    }
    let fade_tx = tx.clone();
    let mut engine = engine.with_fade(move || {
        let _ = fade_tx.send(Progress::Draining);
    });

    let tick_tx = tx.clone();
    let handle = engine.start(
        lines.clone(),
        move |revealed: &[DisplayLine], progress: f64| {
            let _ = tick_tx.send(Progress::Tick {
                revealed: revealed.len(),
                progress,
            });
        },
        move || {
            let _ = tx.send(Progress::Completed);
        },
    )?;

    writeln!(out, "{}", HEADER.bold())?;
    writeln!(out)?;
    out.flush()?;

    let mut printed = 0;
    let mut last_progress = 0.0;
    loop {
        let message = tokio::select! {
            biased;
            () = interrupt::wait_for_interrupt() => {
                handle.cancel();
                info!(destination = %destination.label, "headless boot interrupted");
                writeln!(out)?;
                writeln!(out, "{}", "Interrupted".red())?;
                return Err(interrupt::InterruptedError.into());
            }
            message = rx.recv() => message,
        };

        match message {
            Some(Progress::Tick { revealed, progress }) => {
                for line in &lines[printed..revealed.min(lines.len())] {
                    writeln!(out, "{}", styled(line))?;
                }
                printed = printed.max(revealed);
                last_progress = progress;
            }
            Some(Progress::Draining) => {
                writeln!(out)?;
                writeln!(out, "{}", progress_bar(last_progress, ceiling).red())?;
                writeln!(out, "{}", FOOTER.dark_grey())?;
            }
            Some(Progress::Completed) | None => break,
        }
        out.flush()?;
    }

    writeln!(out)?;
    writeln!(out, "{}", CONNECTING_TITLE.red().bold())?;
    writeln!(out, "{CONNECTING_SUBTITLE}")?;
    out.flush()?;

    tokio::select! {
        biased;
        () = interrupt::wait_for_interrupt() => {
            writeln!(out, "{}", "Interrupted".red())?;
            return Err(interrupt::InterruptedError.into());
        }
        () = tokio::time::sleep(config.connect.delay()) => {}
    }

    let opened = open_browser
        && match open::that(&destination.url) {
            Ok(()) => true,
            Err(err) => {
                warn!(url = %destination.url, error = %err, "failed to open browser");
                writeln!(out, "Could not open a browser: {err}")?;
                false
            }
        };
    writeln!(out, "{}", redirect_line(&destination.url, opened))?;
    Ok(())
}

/// Last line of a run: only claims a redirect when the browser was opened.
pub(crate) fn redirect_line(url: &str, opened: bool) -> String {
    if opened {
        format!("Redirected to {url}")
    } else {
        format!("Open {url}")
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_ctrl_c_cancels_boot_before_redirect() {
        interrupt::reset();
        let mut config = Config::default();
        config.seed = Some(4);
        let catalog = config.catalog();
        let destination = catalog.get(0).unwrap();

        let trigger = tokio::spawn(async {
            tokio::time::sleep(Duration::from_millis(400)).await;
            interrupt::trigger_ctrl_c();
        });

        let mut out = Vec::new();
        let err = play(
            HeadlessOptions {
                config: &config,
                destination,
                open_browser: false,
            },
            &mut out,
        )
        .await
        .unwrap_err();
        trigger.await.unwrap();
        interrupt::reset();

        assert!(err.downcast_ref::<interrupt::InterruptedError>().is_some());
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Interrupted"));
        assert!(!out.contains(FOOTER));
        assert!(!out.contains(CONNECTING_TITLE));
        assert!(!out.contains(&destination.url));
    }

    #[test]
    fn test_redirect_line_only_claims_opened_browser() {
        assert_eq!(
            redirect_line("https://example.com", true),
            "Redirected to https://example.com"
        );
        assert_eq!(
            redirect_line("https://example.com", false),
            "Open https://example.com"
        );
    }

    #[test]
    fn test_progress_bar_fill() {
        let bar = progress_bar(50.0, 100.0);
        assert_eq!(bar.matches('#').count(), BAR_WIDTH / 2);
        assert!(bar.ends_with(" 50%"));
        assert!(progress_bar(250.0, 100.0).ends_with("100%"));
        assert!(progress_bar(5.0, 0.0).ends_with("  0%"));
    }
}
