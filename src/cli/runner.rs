use anyhow::Result;
use clap::Parser;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::Level;

use super::{Cli, Commands};
use crate::app;
use crate::cli_cmds::*;

const LOG_FILE: &str = "galleria.log";

pub(crate) async fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config_path = cli.config.clone().unwrap_or_else(app::Config::config_path);
    let config = app::Config::load_from(&config_path)?;

    match cli.command {
        Some(Commands::List { filter, json }) => {
            cmd_list(&config, &filter, json)?;
        }
        Some(Commands::Categories) => {
            cmd_categories(&config);
        }
        Some(Commands::Show { id, json }) => {
            cmd_show(&config, id, json)?;
        }
        Some(Commands::Config) => {
            cmd_config(&config_path);
        }
        None => {
            // TUI mode
            let uploads = cli
                .upload
                .iter()
                .map(|p| crate::utils::expand_tilde(&p.to_string_lossy()))
                .collect();
            app::run_tui(config, uploads).await?;
        }
    }

    Ok(())
}

fn log_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "mrmattias", "galleria")
        .map(|dirs| dirs.data_dir().to_path_buf())
}

/// Log to a file; the terminal belongs to the TUI. Failures are ignored.
fn init_logging(verbose: bool) {
    let Some(dir) = log_dir() else {
        return;
    };
    if let Err(e) = try_init_logging(&dir, verbose) {
        eprintln!("Warning: logging disabled: {}", e);
    }
}

fn try_init_logging(dir: &Path, verbose: bool) -> Result<()> {
    fs::create_dir_all(dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE))?;

    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "logging started");
    Ok(())
}
