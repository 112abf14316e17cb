//! `boot` command: headless playback for one destination.

use anyhow::{Context, Result};
use linkboot_core::Config;

use crate::modes::headless::{self, HeadlessOptions};

pub async fn run(config: &Config, query: &str, no_open: bool) -> Result<()> {
    let catalog = config.catalog();
    let destination = catalog.find(query).with_context(|| {
        format!("Unknown destination '{query}'. Run `linkboot links` to see the list.")
    })?;

    headless::run(HeadlessOptions {
        config,
        destination,
        open_browser: config.connect.open_browser && !no_open,
    })
    .await
}
