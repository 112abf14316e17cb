//! Lightning strikes drawn over every screen.
//!
//! A strike lands at a random column and lasts `lightning_duration_ms`.
//! Strikes come from menu selections, from the boot session's ambient
//! effect, and from a background roll once per second.

use std::time::{Duration, Instant};

use linkboot_core::config::EffectsConfig;
use rand::Rng;
use ratatui::Frame;
use ratatui::style::{Color, Modifier, Style};

const ROLL_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Strike {
    /// Horizontal position as a fraction of the screen width.
    pub position: f64,
    pub until: Instant,
}

#[derive(Debug)]
pub struct LightningState {
    pub enabled: bool,
    chance_per_sec: f64,
    duration: Duration,
    last_roll: Option<Instant>,
    strikes: Vec<Strike>,
}

impl LightningState {
    pub fn new(config: &EffectsConfig) -> Self {
        Self {
            enabled: config.lightning,
            chance_per_sec: config.lightning_chance_per_sec,
            duration: config.lightning_duration(),
            last_roll: None,
            strikes: Vec::new(),
        }
    }

    pub fn strikes(&self) -> &[Strike] {
        &self.strikes
    }

    pub fn is_active(&self) -> bool {
        !self.strikes.is_empty()
    }

    pub fn strike<R: Rng + ?Sized>(&mut self, rng: &mut R, now: Instant) {
        if !self.enabled {
            return;
        }
        self.strikes.push(Strike {
            position: rng.random::<f64>(),
            until: now + self.duration,
        });
    }

    /// Drops finished strikes and rolls for a background strike once per second.
    pub fn on_tick<R: Rng + ?Sized>(&mut self, rng: &mut R, now: Instant) {
        self.strikes.retain(|s| s.until > now);

        let due = self
            .last_roll
            .is_none_or(|last| now.duration_since(last) >= ROLL_INTERVAL);
        if !due {
            return;
        }
        self.last_roll = Some(now);
        if rng.random::<f64>() < self.chance_per_sec {
            self.strike(rng, now);
        }
    }
}

/// Draws a jagged bolt from the top of the screen for every live strike.
pub fn render(state: &LightningState, frame: &mut Frame) {
    let area = frame.area();
    if area.width == 0 {
        return;
    }
    let style = Style::default()
        .fg(Color::LightYellow)
        .add_modifier(Modifier::BOLD);
    let buf = frame.buffer_mut();
    for strike in state.strikes() {
        let base = area.x + (strike.position * f64::from(area.width - 1)).round() as u16;
        for dy in 0..area.height {
            let (x, glyph) = match (dy / 2) % 3 {
                0 => (base, '│'),
                1 => (base.saturating_add(1), '╲'),
                _ => (base, '╱'),
            };
            if x >= area.right() {
                continue;
            }
            if let Some(cell) = buf.cell_mut((x, area.y + dy)) {
                cell.set_char(glyph).set_style(style);
            }
        }
    }
}
