//! Full-screen terminal front-end for linkboot.
//!
//! Elm-style split: `update` is the pure reducer, `render` the pure view,
//! and `runtime` owns the terminal and executes effects.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stdout};

use anyhow::{Context, Result};
use linkboot_core::Config;
pub use runtime::TuiRuntime;

/// Runs the interactive menu until the user quits or a redirect fires.
///
/// Must be called from within a multi-threaded tokio runtime: playback
/// sessions and timers are spawned onto it while this call blocks on the
/// terminal event loop.
///
/// Returns the URL the session redirected to, if any.
///
/// # Errors
/// Returns an error if stdout is not a terminal, the boot timing is
/// unusable, or the terminal fails.
pub fn run_interactive(config: Config) -> Result<Option<String>> {
    if !stdout().is_terminal() {
        anyhow::bail!(
            "The interactive menu requires a terminal.\n\
             Use `linkboot boot <DESTINATION>` for headless playback."
        );
    }
    config
        .boot
        .timing()
        .validate()
        .context("Invalid [boot] settings")?;

    let mut runtime = TuiRuntime::new(config)?;
    runtime.run()?;
    let redirected = runtime.state.redirected.take();
    drop(runtime);

    Ok(redirected)
}
