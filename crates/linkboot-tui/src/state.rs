//! Application state composition.
//!
//! ```text
//! AppState
//! ├── screen: Screen          (which view is up, plus its session state)
//! ├── menu: MenuState         (selection survives a trip through the boot)
//! ├── lightning: LightningState
//! ├── rain: RainState
//! ├── session_seq: SessionSeq (boot session id generator)
//! └── config / catalog
//! ```
//!
//! State is only mutated by the reducer in `update.rs`.

use linkboot_core::{Catalog, Config, Destination};
use linkboot_engine::DisplayLine;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::common::{SessionId, SessionSeq};
use crate::features::boot::BootState;
use crate::features::lightning::LightningState;
use crate::features::menu::MenuState;
use crate::features::rain::RainState;

/// The view currently on screen.
#[derive(Debug)]
pub enum Screen {
    Menu,
    Boot(BootState),
    Connecting(ConnectingState),
}

/// Waiting out the connect delay before redirecting.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectingState {
    pub session: SessionId,
    pub destination: Destination,
}

#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub menu: MenuState,
    pub lightning: LightningState,
    pub rain: RainState,
    pub session_seq: SessionSeq,
    pub config: Config,
    pub catalog: Catalog,
    /// Last known terminal size (width, height).
    pub viewport: (u16, u16),
    /// Frames rendered so far; drives small animations.
    pub frame_count: usize,
    pub should_quit: bool,
    /// URL the session ended on, reported after the terminal is restored.
    pub redirected: Option<String>,
    /// Drives the decorative effects. Seeded from the config when set.
    pub rng: StdRng,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let catalog = config.catalog();
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            screen: Screen::Menu,
            menu: MenuState::default(),
            lightning: LightningState::new(&config.effects),
            rain: RainState::new(config.effects.matrix_rain),
            session_seq: SessionSeq::default(),
            config,
            catalog,
            viewport: (0, 0),
            frame_count: 0,
            should_quit: false,
            redirected: None,
            rng,
        }
    }

    pub fn boot(&self) -> Option<&BootState> {
        match &self.screen {
            Screen::Boot(boot) => Some(boot),
            _ => None,
        }
    }

    pub fn is_booting(&self) -> bool {
        self.boot().is_some()
    }

    /// Whether something on screen is moving and needs the fast frame clock.
    pub fn is_animating(&self) -> bool {
        match &self.screen {
            Screen::Menu => self.rain.enabled || self.lightning.is_active(),
            Screen::Boot(_) | Screen::Connecting(_) => true,
        }
    }

    /// Lines revealed so far on the boot screen.
    pub fn revealed_lines(&self) -> &[DisplayLine] {
        match self.boot() {
            Some(boot) => boot.revealed_lines(),
            None => &[],
        }
    }
}
