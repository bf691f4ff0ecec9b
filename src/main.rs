mod app;
mod cli;
mod cli_cmds;
mod gallery;
mod toast;
mod ui;
mod upload;
mod utils;
mod watch;

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
