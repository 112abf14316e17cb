//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use linkboot_core::{config, interrupt, logging};

mod commands;

#[derive(Parser)]
#[command(name = "linkboot")]
#[command(version)]
#[command(about = "Boot-loader style link launcher")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Fixed RNG seed for the boot schedule (overrides the config)
    #[arg(long, global = true, env = "LINKBOOT_SEED")]
    seed: Option<u64>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Play the boot sequence for a destination on stdout, then redirect
    Boot {
        /// Destination label or 1-based number (see `linkboot links`)
        #[arg(value_name = "DESTINATION")]
        destination: String,

        /// Print the destination URL instead of opening a browser
        #[arg(long = "no-open")]
        no_open: bool,
    },
    /// List the available destinations
    Links,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Held until exit so buffered log lines reach the file.
    let _log_guard = logging::init(&config::paths::logs_dir());
    interrupt::init()?;

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let mut config = config::Config::load().context("load config")?;
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    // default to the interactive menu
    let Some(command) = cli.command else {
        return commands::menu::run(config);
    };

    match command {
        Commands::Boot {
            destination,
            no_open,
        } => commands::boot::run(&config, &destination, no_open).await,
        Commands::Links => {
            commands::links::run(&config);
            Ok(())
        }
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
