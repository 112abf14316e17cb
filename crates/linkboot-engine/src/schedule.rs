//! Pure schedule functions.
//!
//! All randomness of a session flows through these, driven by a caller-owned
//! RNG. Seeding that RNG makes a whole session reproducible.

use std::time::Duration;

use rand::Rng;

use crate::timing::{DelayRange, StepRange};

/// Draws the wait before the next reveal tick, in whole milliseconds.
///
/// Timers fire on millisecond ticks, so a finer draw could round past `max`.
pub fn next_delay<R: Rng + ?Sized>(rng: &mut R, range: DelayRange) -> Duration {
    let floor = |d: Duration| u64::try_from(d.as_millis()).unwrap_or(u64::MAX);
    let mut lo = floor(range.min);
    if Duration::from_millis(lo) < range.min {
        lo = lo.saturating_add(1);
    }
    let hi = floor(range.max);
    if lo >= hi {
        return range.min;
    }
    Duration::from_millis(rng.random_range(lo..=hi))
}

/// Draws the progress increment for one reveal tick.
pub fn next_progress_increment<R: Rng + ?Sized>(rng: &mut R, range: StepRange) -> f64 {
    if range.min >= range.max {
        return range.min;
    }
    rng.random_range(range.min..=range.max)
}

/// Rolls whether the ambient effect fires on this tick.
///
/// Always consumes exactly one draw, so the rest of the schedule does not
/// depend on whether an ambient collaborator is installed.
pub fn roll_ambient<R: Rng + ?Sized>(rng: &mut R, probability: f64) -> bool {
    let roll: f64 = rng.random();
    roll < probability
}

/// Applies an increment with clamp-to-ceiling saturation.
pub fn advance_progress(current: f64, increment: f64, ceiling: f64) -> f64 {
    (current + increment.max(0.0)).min(ceiling)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_delay_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let range = DelayRange::from_millis(50, 130);
        for _ in 0..1000 {
            let d = next_delay(&mut rng, range);
            assert!(d >= range.min && d <= range.max, "{d:?}");
        }
    }

    #[test]
    fn test_delay_is_whole_milliseconds() {
        let mut rng = StdRng::seed_from_u64(8);
        let range = DelayRange::from_millis(50, 130);
        for _ in 0..200 {
            assert_eq!(next_delay(&mut rng, range).subsec_nanos() % 1_000_000, 0);
        }
    }

    #[test]
    fn test_degenerate_delay_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let range = DelayRange::from_millis(80, 80);
        assert_eq!(next_delay(&mut rng, range), Duration::from_millis(80));
    }

    #[test]
    fn test_increment_within_bounds() {
        let mut rng = StdRng::seed_from_u64(11);
        let range = StepRange { min: 1.0, max: 4.0 };
        for _ in 0..1000 {
            let step = next_progress_increment(&mut rng, range);
            assert!((1.0..=4.0).contains(&step), "{step}");
        }
    }

    #[test]
    fn test_same_seed_same_schedule() {
        let range = DelayRange::from_millis(50, 130);
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        let left: Vec<Duration> = (0..20).map(|_| next_delay(&mut a, range)).collect();
        let right: Vec<Duration> = (0..20).map(|_| next_delay(&mut b, range)).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn test_roll_ambient_extremes() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!((0..100).all(|_| !roll_ambient(&mut rng, 0.0)));
        assert!((0..100).all(|_| roll_ambient(&mut rng, 1.0)));
    }

    #[test]
    fn test_advance_progress_clamps() {
        assert!((advance_progress(98.5, 3.0, 100.0) - 100.0).abs() < f64::EPSILON);
        assert!((advance_progress(10.0, 2.5, 100.0) - 12.5).abs() < f64::EPSILON);
    }
}
