//! Per-session playback state.

use crate::schedule::advance_progress;

/// Lifecycle phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Lines are still being revealed (or the trailing pause is running).
    Running,
    /// All lines are out; the host may fade the screen.
    Draining,
    /// Terminal. No further mutation.
    Complete,
}

/// Mutable state owned by exactly one session task.
///
/// Every mutator is a no-op once `Complete` is reached.
#[derive(Debug, Clone)]
pub struct PlaybackState {
    total: usize,
    revealed_count: usize,
    progress: f64,
    ceiling: f64,
    phase: Phase,
}

impl PlaybackState {
    pub fn new(total: usize, ceiling: f64) -> Self {
        Self {
            total,
            revealed_count: 0,
            progress: 0.0,
            ceiling,
            phase: Phase::Running,
        }
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed_count
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn all_revealed(&self) -> bool {
        self.revealed_count >= self.total
    }

    /// Reveals the next line and advances progress by `increment`.
    ///
    /// Returns false when there is nothing left to reveal or the session has
    /// left `Running`.
    pub fn reveal(&mut self, increment: f64) -> bool {
        if self.phase != Phase::Running || self.all_revealed() {
            return false;
        }
        self.revealed_count += 1;
        self.progress = advance_progress(self.progress, increment, self.ceiling);
        true
    }

    /// Saturates progress at the ceiling.
    pub fn settle(&mut self) {
        if self.phase == Phase::Complete {
            return;
        }
        self.progress = self.ceiling;
    }

    pub fn begin_drain(&mut self) {
        if self.phase == Phase::Running {
            self.phase = Phase::Draining;
        }
    }

    /// Moves to `Complete`. Returns true only on the first call.
    pub fn complete(&mut self) -> bool {
        if self.phase == Phase::Complete {
            return false;
        }
        self.phase = Phase::Complete;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveal_bounded_by_total() {
        let mut state = PlaybackState::new(2, 100.0);
        assert!(state.reveal(1.0));
        assert!(state.reveal(1.0));
        assert!(!state.reveal(1.0));
        assert_eq!(state.revealed_count(), 2);
    }

    #[test]
    fn test_progress_saturates() {
        let mut state = PlaybackState::new(3, 100.0);
        state.reveal(60.0);
        state.reveal(60.0);
        assert!((state.progress() - 100.0).abs() < f64::EPSILON);
        state.reveal(60.0);
        assert!((state.progress() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_no_reveal_while_draining() {
        let mut state = PlaybackState::new(3, 100.0);
        state.begin_drain();
        assert!(!state.reveal(1.0));
        assert_eq!(state.phase(), Phase::Draining);
    }

    #[test]
    fn test_complete_only_once() {
        let mut state = PlaybackState::new(0, 100.0);
        state.begin_drain();
        assert!(state.complete());
        assert!(!state.complete());
        state.settle();
        state.begin_drain();
        assert_eq!(state.phase(), Phase::Complete);
        assert!(state.progress().abs() < f64::EPSILON);
    }
}
