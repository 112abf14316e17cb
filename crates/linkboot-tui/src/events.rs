//! UI event types.
//!
//! Everything the reducer reacts to arrives as a `UiEvent`: terminal input,
//! the frame clock, and messages sent into the runtime inbox by playback
//! sessions and timers.

use crossterm::event::Event;

use crate::common::SessionId;

/// Progress reported by a running boot session.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackUiEvent {
    /// `revealed` lines of the script are visible at `progress`.
    Tick { revealed: usize, progress: f64 },
    /// The session finished revealing and started fading out.
    Draining,
    Completed,
    /// The session could not be started.
    Failed(String),
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    /// Frame clock; drives animations and renders.
    Tick,
    /// Current terminal size, sent before every batch of events.
    Frame { width: u16, height: u16 },
    Terminal(Event),
    Playback {
        session: SessionId,
        event: PlaybackUiEvent,
    },
    /// Request a lightning strike (ambient effect of the boot session).
    Lightning,
    /// The connecting delay for `session` elapsed.
    RedirectDue { session: SessionId },
}
