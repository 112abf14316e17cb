//! Effect handlers that touch the playback engine or the outside world.

use linkboot_core::{Config, Destination, script};
use linkboot_engine::{DisplayLine, PlaybackEngine, PlaybackError, PlaybackHandle};
use tracing::{info, warn};

use super::inbox::UiEventSender;
use crate::common::SessionId;
use crate::events::{PlaybackUiEvent, UiEvent};

fn playback(session: SessionId, event: PlaybackUiEvent) -> UiEvent {
    UiEvent::Playback { session, event }
}

/// Starts a playback session whose callbacks all feed the inbox.
///
/// The engine's ambient effect becomes a lightning strike; its fade hook
/// dims the boot screen.
pub(super) fn start_boot(
    config: &Config,
    session: SessionId,
    destination: &Destination,
    tx: &UiEventSender,
) -> Result<PlaybackHandle, PlaybackError> {
    let mut engine = PlaybackEngine::new(config.boot.timing());
    if let Some(seed) = config.seed {
        engine = engine.with_seed(seed.wrapping_add(session.0));
    }

    let ambient_tx = tx.clone();
    let fade_tx = tx.clone();
    let mut engine = engine
        .with_ambient(move || {
            let _ = ambient_tx.send(UiEvent::Lightning);
        })
        .with_fade(move || {
            let _ = fade_tx.send(playback(session, PlaybackUiEvent::Draining));
        });

    let tick_tx = tx.clone();
    let done_tx = tx.clone();
    engine.start(
        script::boot_script(destination),
        move |revealed: &[DisplayLine], progress: f64| {
            let _ = tick_tx.send(playback(
                session,
                PlaybackUiEvent::Tick {
                    revealed: revealed.len(),
                    progress,
                },
            ));
        },
        move || {
            let _ = done_tx.send(playback(session, PlaybackUiEvent::Completed));
        },
    )
}

pub(super) fn open_destination(url: &str) {
    match open::that(url) {
        Ok(()) => info!(url, "opened destination"),
        Err(err) => warn!(url, error = %err, "failed to open browser"),
    }
}
