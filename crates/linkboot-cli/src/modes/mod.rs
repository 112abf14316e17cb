//! Runtime execution modes.
//!
//! - `headless`: boot sequence printed to stdout
//! - `tui`: full-screen interactive menu (optional feature)

pub mod headless;

#[cfg(feature = "tui")]
pub use linkboot_tui::run_interactive;

#[cfg(not(feature = "tui"))]
pub fn run_interactive(_config: linkboot_core::Config) -> anyhow::Result<Option<String>> {
    anyhow::bail!(
        "TUI support is disabled in this build (feature \"tui\"). \
         Use `linkboot boot <DESTINATION>` instead."
    );
}
