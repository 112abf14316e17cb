//! Default command: the interactive menu.

use anyhow::{Context, Result};
use linkboot_core::Config;

use crate::modes::{self, headless};

pub fn run(config: Config) -> Result<()> {
    let opens_browser = config.connect.open_browser;
    let redirected = modes::run_interactive(config).context("interactive menu failed")?;
    if let Some(url) = redirected {
        println!("{}", headless::redirect_line(&url, opens_browser));
    }
    Ok(())
}
