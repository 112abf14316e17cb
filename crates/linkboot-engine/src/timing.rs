//! Timing and randomness bounds for a playback session.

use std::time::Duration;

use crate::error::PlaybackError;

/// Inclusive range a per-line reveal delay is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayRange {
    pub min: Duration,
    pub max: Duration,
}

impl DelayRange {
    pub const fn from_millis(min: u64, max: u64) -> Self {
        Self {
            min: Duration::from_millis(min),
            max: Duration::from_millis(max),
        }
    }
}

/// Inclusive range a progress increment is drawn from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepRange {
    pub min: f64,
    pub max: f64,
}

/// All tunables of a playback session.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackTiming {
    /// Jitter bounds between two reveal ticks.
    pub reveal_delay: DelayRange,
    /// Bounds of the progress increment applied on each reveal tick.
    pub progress_step: StepRange,
    /// Value progress saturates at.
    pub progress_ceiling: f64,
    /// Chance per reveal tick of firing the ambient effect.
    pub ambient_probability: f64,
    /// Pause after the last line before draining.
    pub trailing_delay: Duration,
    /// Pause between entering `Draining` and completion.
    pub drain_delay: Duration,
}

impl PlaybackTiming {
    pub const DEFAULT_REVEAL_DELAY: DelayRange = DelayRange::from_millis(50, 130);
    pub const DEFAULT_PROGRESS_STEP: StepRange = StepRange { min: 1.0, max: 4.0 };
    pub const DEFAULT_CEILING: f64 = 100.0;
    pub const DEFAULT_AMBIENT_PROBABILITY: f64 = 0.08;
    pub const DEFAULT_TRAILING_DELAY: Duration = Duration::from_millis(1500);
    pub const DEFAULT_DRAIN_DELAY: Duration = Duration::from_millis(2000);

    /// Checks that every range is ordered and every value usable.
    ///
    /// # Errors
    /// Returns `PlaybackError::InvalidTiming` describing the first bad field.
    pub fn validate(&self) -> Result<(), PlaybackError> {
        let invalid = |msg: String| Err(PlaybackError::InvalidTiming(msg));

        if self.reveal_delay.min > self.reveal_delay.max {
            return invalid(format!(
                "reveal delay min {:?} exceeds max {:?}",
                self.reveal_delay.min, self.reveal_delay.max
            ));
        }

        let step = self.progress_step;
        if !step.min.is_finite() || !step.max.is_finite() {
            return invalid("progress step bounds must be finite".to_string());
        }
        if step.min <= 0.0 {
            return invalid(format!("progress step min must be positive, got {}", step.min));
        }
        if step.min > step.max {
            return invalid(format!(
                "progress step min {} exceeds max {}",
                step.min, step.max
            ));
        }

        if !self.progress_ceiling.is_finite() || self.progress_ceiling <= 0.0 {
            return invalid(format!(
                "progress ceiling must be a positive number, got {}",
                self.progress_ceiling
            ));
        }

        if !(0.0..=1.0).contains(&self.ambient_probability) {
            return invalid(format!(
                "ambient probability must be within [0, 1], got {}",
                self.ambient_probability
            ));
        }

        Ok(())
    }

    /// Shortest and longest wall time a session over `lines` lines can take.
    pub fn total_bounds(&self, lines: usize) -> (Duration, Duration) {
        let n = u32::try_from(lines).unwrap_or(u32::MAX);
        let tail = self.trailing_delay + self.drain_delay;
        (
            self.reveal_delay.min.saturating_mul(n) + tail,
            self.reveal_delay.max.saturating_mul(n) + tail,
        )
    }
}

impl Default for PlaybackTiming {
    fn default() -> Self {
        Self {
            reveal_delay: Self::DEFAULT_REVEAL_DELAY,
            progress_step: Self::DEFAULT_PROGRESS_STEP,
            progress_ceiling: Self::DEFAULT_CEILING,
            ambient_probability: Self::DEFAULT_AMBIENT_PROBABILITY,
            trailing_delay: Self::DEFAULT_TRAILING_DELAY,
            drain_delay: Self::DEFAULT_DRAIN_DELAY,
        }
    }
}
