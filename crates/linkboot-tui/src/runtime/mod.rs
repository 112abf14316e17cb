//! TUI runtime: owns the terminal, runs the event loop, executes effects.
//!
//! All side effects happen here. The reducer stays pure and produces
//! effects; this module starts and cancels playback sessions, arms the
//! redirect timer, and opens the browser.
//!
//! Async results (playback callbacks, timers) arrive through the inbox
//! channel, which the loop drains once per frame.

mod handlers;
mod inbox;

use std::future::Future;
use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use inbox::{UiEventReceiver, UiEventSender};
use linkboot_core::Config;
use linkboot_core::interrupt;
use linkboot_engine::PlaybackHandle;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;
use tracing::warn;

use crate::effects::UiEffect;
use crate::events::{PlaybackUiEvent, UiEvent};
use crate::state::AppState;
use crate::{render, terminal, update};

/// Frame interval while something is animating (~60fps).
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Poll interval when nothing on screen moves.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// Full-screen TUI runtime.
///
/// Terminal state is restored on drop, panic, or a second Ctrl+C.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
    /// Live boot session; dropping it cancels the session.
    playback: Option<PlaybackHandle>,
    last_tick: Instant,
    last_terminal_event: Instant,
}

impl TuiRuntime {
    /// Creates the runtime and takes over the terminal.
    ///
    /// # Errors
    /// Returns an error if the terminal can't be put into raw mode.
    pub fn new(config: Config) -> Result<Self> {
        // Panic hook goes in before the alternate screen.
        terminal::install_panic_hook();
        interrupt::set_restore_hook(|| {
            let _ = terminal::restore_terminal();
        });
        interrupt::reset();

        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        let now = Instant::now();
        Ok(Self {
            terminal,
            state: AppState::new(config),
            inbox_tx,
            inbox_rx,
            playback: None,
            last_tick: now,
            last_terminal_event: now,
        })
    }

    /// Runs the main event loop until the user quits or a redirect fires.
    ///
    /// # Errors
    /// Returns an error if drawing or reading terminal events fails.
    pub fn run(&mut self) -> Result<()> {
        terminal::enable_mouse()?;
        let result = self.event_loop();
        let _ = terminal::disable_mouse();
        result
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.state.should_quit {
            // Raw mode turns Ctrl+C into a key event; this catches SIGINT
            // sent from outside.
            if interrupt::is_interrupted() {
                self.execute_effect(UiEffect::CancelBoot);
                self.state.should_quit = true;
                break;
            }

            let mut events = self.collect_events()?;

            // Frame goes first so layout-dependent handlers see the current size.
            let size = self.terminal.size()?;
            events.insert(
                0,
                UiEvent::Frame {
                    width: size.width,
                    height: size.height,
                },
            );

            for event in events {
                if matches!(&event, UiEvent::Terminal(_)) {
                    self.last_terminal_event = Instant::now();
                }
                // Renders are batched to the tick cadence.
                if matches!(&event, UiEvent::Tick) {
                    dirty = true;
                }
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| render::render(&self.state, frame))?;
                dirty = false;
            }
        }

        Ok(())
    }

    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let recent_terminal_activity = self.last_terminal_event.elapsed() < IDLE_POLL_DURATION;
        let tick_interval = if self.state.is_animating() || recent_terminal_activity {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        while let Ok(event) = self.inbox_rx.try_recv() {
            events.push(event);
        }

        // Block until the next tick unless there is already work queued.
        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    fn dispatch_event(&mut self, event: UiEvent) {
        let effects = update::update(&mut self.state, event);
        self.execute_effects(effects);
    }

    /// Spawns `f` and sends the event it resolves to into the inbox.
    fn spawn_effect<F, Fut>(&self, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(f().await);
        });
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }
            UiEffect::StartBoot {
                session,
                destination,
            } => {
                if let Some(previous) = self.playback.take() {
                    previous.cancel();
                }
                match handlers::start_boot(&self.state.config, session, &destination, &self.inbox_tx)
                {
                    Ok(handle) => self.playback = Some(handle),
                    Err(err) => {
                        warn!(error = %err, "failed to start boot session");
                        self.dispatch_event(UiEvent::Playback {
                            session,
                            event: PlaybackUiEvent::Failed(err.to_string()),
                        });
                    }
                }
            }
            UiEffect::CancelBoot => {
                if let Some(handle) = self.playback.take() {
                    handle.cancel();
                }
            }
            UiEffect::ScheduleRedirect { session, delay } => {
                self.spawn_effect(move || async move {
                    tokio::time::sleep(delay).await;
                    UiEvent::RedirectDue { session }
                });
            }
            UiEffect::OpenDestination { url } => handlers::open_destination(&url),
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        if let Some(handle) = self.playback.take() {
            handle.cancel();
        }
        let _ = terminal::restore_terminal();
    }
}
