//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! Starting and cancelling playback, timers, and opening the browser all
//! happen in the runtime; the reducer only decides when.

use std::time::Duration;

use linkboot_core::Destination;

use crate::common::SessionId;

#[derive(Debug, Clone, PartialEq)]
pub enum UiEffect {
    Quit,

    /// Start a playback session for `destination`'s boot script.
    StartBoot {
        session: SessionId,
        destination: Destination,
    },

    /// Cancel the running playback session, if any.
    CancelBoot,

    /// Send `RedirectDue { session }` after `delay`.
    ScheduleRedirect { session: SessionId, delay: Duration },

    /// Open a URL in the system browser.
    OpenDestination { url: String },
}
