//! Scripted playback engine for the linkboot boot screen.
//!
//! Reveals an ordered list of [`DisplayLine`]s on a jittered schedule,
//! advances a bounded progress value, and signals completion exactly once.
//! Hosts render whatever the callbacks hand them; the engine knows nothing
//! about terminals, colours, or effects beyond the injected collaborators.

mod ambient;
mod engine;
mod error;
mod gate;
mod line;
pub mod schedule;
mod state;
mod timing;

pub use ambient::AmbientEffect;
pub use engine::{PlaybackEngine, PlaybackHandle, SessionOutcome};
pub use error::PlaybackError;
pub use line::{Category, DisplayLine};
pub use state::{Phase, PlaybackState};
pub use timing::{DelayRange, PlaybackTiming, StepRange};
