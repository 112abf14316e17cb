//! Configuration management for linkboot.
//!
//! Loads configuration from ${LINKBOOT_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use linkboot_engine::{DelayRange, PlaybackTiming, StepRange};
use serde::{Deserialize, Serialize};

use crate::destinations::{Catalog, Destination};

/// Returns the default config template with comments.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for linkboot configuration and logs.
    //!
    //! LINKBOOT_HOME resolution order:
    //! 1. LINKBOOT_HOME environment variable (if set)
    //! 2. ~/.config/linkboot (default)
    //! 3. ./.linkboot when no home directory can be determined

    use std::path::PathBuf;

    pub fn linkboot_home() -> PathBuf {
        if let Ok(home) = std::env::var("LINKBOOT_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".linkboot"),
            |h| h.join(".config").join("linkboot"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        linkboot_home().join("config.toml")
    }

    /// Returns the directory log files are written to.
    pub fn logs_dir() -> PathBuf {
        linkboot_home().join("logs")
    }
}

/// Boot sequence timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootConfig {
    pub reveal_delay_min_ms: u64,
    pub reveal_delay_max_ms: u64,
    pub progress_step_min: f64,
    pub progress_step_max: f64,
    pub progress_ceiling: f64,
    pub ambient_probability: f64,
    pub trailing_delay_ms: u64,
    pub drain_delay_ms: u64,
}

impl BootConfig {
    /// Engine timing for these settings.
    pub fn timing(&self) -> PlaybackTiming {
        PlaybackTiming {
            reveal_delay: DelayRange::from_millis(
                self.reveal_delay_min_ms,
                self.reveal_delay_max_ms,
            ),
            progress_step: StepRange {
                min: self.progress_step_min,
                max: self.progress_step_max,
            },
            progress_ceiling: self.progress_ceiling,
            ambient_probability: self.ambient_probability,
            trailing_delay: Duration::from_millis(self.trailing_delay_ms),
            drain_delay: Duration::from_millis(self.drain_delay_ms),
        }
    }
}

impl Default for BootConfig {
    fn default() -> Self {
        let timing = PlaybackTiming::default();
        Self {
            reveal_delay_min_ms: timing.reveal_delay.min.as_millis() as u64,
            reveal_delay_max_ms: timing.reveal_delay.max.as_millis() as u64,
            progress_step_min: timing.progress_step.min,
            progress_step_max: timing.progress_step.max,
            progress_ceiling: timing.progress_ceiling,
            ambient_probability: timing.ambient_probability,
            trailing_delay_ms: timing.trailing_delay.as_millis() as u64,
            drain_delay_ms: timing.drain_delay.as_millis() as u64,
        }
    }
}

/// Redirect behaviour after the boot sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectConfig {
    pub delay_ms: u64,
    pub open_browser: bool,
}

impl ConnectConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for ConnectConfig {
    fn default() -> Self {
        Self {
            delay_ms: 2000,
            open_browser: true,
        }
    }
}

/// Decorative effects in the terminal UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    pub lightning: bool,
    pub lightning_chance_per_sec: f64,
    pub lightning_duration_ms: u64,
    pub matrix_rain: bool,
}

impl EffectsConfig {
    pub fn lightning_duration(&self) -> Duration {
        Duration::from_millis(self.lightning_duration_ms)
    }
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            lightning: true,
            lightning_chance_per_sec: 0.02,
            lightning_duration_ms: 300,
            matrix_rain: true,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Fixed RNG seed (None = OS entropy).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    pub boot: BootConfig,

    pub connect: ConnectConfig,

    pub effects: EffectsConfig,

    /// Replaces the built-in catalog when non-empty.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub destinations: Vec<Destination>,
}

impl Config {
    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Creates a default config file at the given path.
    ///
    /// # Errors
    /// Returns an error if the file already exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, default_config_template())
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }

    /// Destinations to offer: the configured list, or the built-in one.
    pub fn catalog(&self) -> Catalog {
        if self.destinations.is_empty() {
            Catalog::builtin()
        } else {
            Catalog::new(self.destinations.clone())
        }
    }
}
