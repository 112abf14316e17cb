//! Matrix rain behind the menu.

use std::time::{Duration, Instant};

use rand::Rng;
use rand::seq::IndexedRandom;
use ratatui::Frame;
use ratatui::style::{Color, Style};

/// Time between two rain steps.
pub const STEP_INTERVAL: Duration = Duration::from_millis(35);

const GLYPHS: &[char] = &[
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '1', '2', '3', '4', '5', '6', '7', '8', '9', '@',
    '#', '$', '%', '^', '&', '*', '(', ')', '+', '-', '/', '~', '{', '[', '|', '`', ']', '}',
];

/// Cells of fading tail drawn above each drop head.
const TRAIL: usize = 6;
/// Drops fall in every other column.
const COLUMN_SPACING: u16 = 2;
/// Chance per step that a drop past the bottom restarts at the top.
const RESET_CHANCE: f64 = 0.025;

#[derive(Debug, Clone, PartialEq, Eq)]
struct RainDrop {
    row: u16,
    /// Most recent glyph first.
    trail: [char; TRAIL],
}

#[derive(Debug)]
pub struct RainState {
    pub enabled: bool,
    drops: Vec<RainDrop>,
    height: u16,
    last_step: Option<Instant>,
}

impl RainState {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            drops: Vec::new(),
            height: 0,
            last_step: None,
        }
    }

    /// Matches the drop columns to the terminal size.
    pub fn resize<R: Rng + ?Sized>(&mut self, width: u16, height: u16, rng: &mut R) {
        self.height = height;
        let columns = usize::from(width.div_ceil(COLUMN_SPACING));
        if columns == self.drops.len() {
            return;
        }
        self.drops.truncate(columns);
        while self.drops.len() < columns {
            self.drops.push(RainDrop {
                row: rng.random_range(0..=height.max(1)),
                trail: [' '; TRAIL],
            });
        }
    }

    /// Advances the rain when a step is due.
    pub fn on_tick<R: Rng + ?Sized>(&mut self, rng: &mut R, now: Instant) {
        if !self.enabled {
            return;
        }
        let due = self
            .last_step
            .is_none_or(|last| now.duration_since(last) >= STEP_INTERVAL);
        if due {
            self.last_step = Some(now);
            self.step(rng);
        }
    }

    fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let height = self.height;
        for column in &mut self.drops {
            if column.row > height && rng.random::<f64>() < RESET_CHANCE {
                column.row = 0;
            }
            column.row = column.row.saturating_add(1);
            column.trail.rotate_right(1);
            column.trail[0] = GLYPHS.choose(rng).copied().unwrap_or('#');
        }
    }
}

pub fn render(state: &RainState, frame: &mut Frame) {
    if !state.enabled {
        return;
    }
    let area = frame.area();
    let buf = frame.buffer_mut();
    for (i, column) in state.drops.iter().enumerate() {
        let Ok(index) = u16::try_from(i) else {
            break;
        };
        let x = area.x + index * COLUMN_SPACING;
        if x >= area.right() {
            break;
        }
        for (age, glyph) in column.trail.iter().enumerate() {
            let Some(row) = column.row.checked_sub(1 + age as u16) else {
                break;
            };
            if row >= area.height || *glyph == ' ' {
                continue;
            }
            let color = match age {
                0 => Color::LightRed,
                1 | 2 => Color::Red,
                _ => Color::Indexed(52),
            };
            if let Some(cell) = buf.cell_mut((x, area.y + row)) {
                cell.set_char(*glyph).set_style(Style::default().fg(color));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_resize_sets_one_drop_per_column_pair() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut rain = RainState::new(true);
        rain.resize(80, 24, &mut rng);
        assert_eq!(rain.drops.len(), 40);
        rain.resize(9, 24, &mut rng);
        assert_eq!(rain.drops.len(), 5);
    }

    #[test]
    fn test_steps_at_most_every_interval() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut rain = RainState::new(true);
        rain.resize(4, 24, &mut rng);
        let start: Vec<u16> = rain.drops.iter().map(|d| d.row).collect();
        let now = Instant::now();

        rain.on_tick(&mut rng, now);
        rain.on_tick(&mut rng, now + Duration::from_millis(10));
        let after: Vec<u16> = rain.drops.iter().map(|d| d.row).collect();
        for (before, after) in start.iter().zip(&after) {
            assert!(*after == before + 1 || *after == 1);
        }

        rain.on_tick(&mut rng, now + STEP_INTERVAL);
        assert_ne!(rain.drops[0].trail[1], ' ');
    }

    #[test]
    fn test_disabled_rain_does_not_move() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut rain = RainState::new(false);
        rain.resize(4, 24, &mut rng);
        let before = rain.drops.clone();
        rain.on_tick(&mut rng, Instant::now());
        assert_eq!(rain.drops, before);
    }
}
