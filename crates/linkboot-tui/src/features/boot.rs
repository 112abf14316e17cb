//! Boot screen: the revealed log, a progress gauge, and the footer.

use linkboot_core::Destination;
use linkboot_core::script::{self, FOOTER, HEADER};
use linkboot_engine::{Category, DisplayLine};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Gauge, Paragraph};

use crate::common::SessionId;
use crate::common::text::truncate_with_ellipsis;

#[derive(Debug, Clone, PartialEq)]
pub struct BootState {
    pub session: SessionId,
    pub destination: Destination,
    lines: Vec<DisplayLine>,
    revealed: usize,
    progress: f64,
    ceiling: f64,
    pub draining: bool,
}

impl BootState {
    pub fn new(session: SessionId, destination: Destination, ceiling: f64) -> Self {
        let lines = script::boot_script(&destination);
        Self {
            session,
            destination,
            lines,
            revealed: 0,
            progress: 0.0,
            ceiling,
            draining: false,
        }
    }

    pub fn script(&self) -> &[DisplayLine] {
        &self.lines
    }

    pub fn revealed_lines(&self) -> &[DisplayLine] {
        &self.lines[..self.revealed]
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Applies a playback tick. Counts past the script are clamped.
    pub fn on_tick(&mut self, revealed: usize, progress: f64) {
        self.revealed = revealed.min(self.lines.len());
        self.progress = progress;
    }

    /// Gauge fill in `[0, 1]`.
    pub fn ratio(&self) -> f64 {
        if self.ceiling > 0.0 {
            (self.progress / self.ceiling).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

pub fn category_style(category: Category) -> Style {
    match category {
        Category::Ok => Style::default().fg(Color::Green),
        Category::Warning => Style::default().fg(Color::Yellow),
        Category::Error => Style::default().fg(Color::Red),
        Category::Info => Style::default().fg(Color::Cyan),
        Category::Plain => Style::default().fg(Color::Gray),
    }
}

pub fn render(boot: &BootState, frame: &mut Frame) {
    let [header, _, log, gauge, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let dim = if boot.draining {
        Modifier::DIM
    } else {
        Modifier::empty()
    };
    let width = usize::from(log.width);

    frame.render_widget(
        Paragraph::new(Line::styled(
            HEADER,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | dim),
        ))
        .centered(),
        header,
    );

    // Tail of the log that fits; older lines scroll off the top.
    let revealed = boot.revealed_lines();
    let skip = revealed.len().saturating_sub(usize::from(log.height));
    let lines: Vec<Line> = revealed[skip..]
        .iter()
        .map(|line| {
            Line::styled(
                truncate_with_ellipsis(&line.text, width),
                category_style(line.category).add_modifier(dim),
            )
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), log);

    let percent = boot.ratio() * 100.0;
    frame.render_widget(
        Gauge::default()
            .ratio(boot.ratio())
            .label(format!("{percent:.0}%"))
            .gauge_style(Style::default().fg(Color::Red).add_modifier(dim)),
        gauge,
    );

    frame.render_widget(
        Paragraph::new(Line::styled(
            truncate_with_ellipsis(FOOTER, usize::from(footer.width)),
            Style::default().fg(Color::DarkGray).add_modifier(dim),
        ))
        .centered(),
        footer,
    );
}

#[cfg(test)]
mod tests {
    use linkboot_core::Section;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;

    fn boot() -> BootState {
        let destination = Destination::new("GitHub", "GitHub", "https://gh", Section::Social);
        BootState::new(SessionId(0), destination, 100.0)
    }

    #[test]
    fn test_tick_clamps_revealed_count() {
        let mut boot = boot();
        boot.on_tick(3, 7.5);
        assert_eq!(boot.revealed_lines().len(), 3);
        boot.on_tick(10_000, 100.0);
        assert_eq!(boot.revealed_lines().len(), boot.script().len());
        assert!((boot.ratio() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_render_shows_latest_lines() {
        let mut boot = boot();
        boot.on_tick(2, 10.0);
        let mut terminal = Terminal::new(TestBackend::new(60, 8)).unwrap();
        terminal.draw(|frame| render(&boot, frame)).unwrap();

        let buffer = terminal.backend().buffer();
        let row = |y: u16| {
            (0..buffer.area.width)
                .map(|x| buffer[(x, y)].symbol())
                .collect::<String>()
        };
        assert!(row(0).contains("GNU GRUB"));
        assert!(row(2).starts_with("[Finished] Checking battery state..."));
        assert_eq!(buffer[(0, 2)].fg, Color::Green);
        assert!(row(3).starts_with("Starting network services..."));
        assert!(row(6).contains("10%"));
    }
}
