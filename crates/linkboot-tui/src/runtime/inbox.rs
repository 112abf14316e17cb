//! Inbox channel: playback callbacks and timers send `UiEvent`s here and the
//! runtime drains it once per frame.

use tokio::sync::mpsc;

use crate::events::UiEvent;

pub type UiEventSender = mpsc::UnboundedSender<UiEvent>;
pub type UiEventReceiver = mpsc::UnboundedReceiver<UiEvent>;
