use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "galleria")]
#[command(author = "MrMattias")]
#[command(version)]
#[command(about = "Terminal image gallery with filters, favorites and a lightbox")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,

    /// Config file (defaults to the platform config dir)
    #[arg(short, long, global = true)]
    pub(crate) config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub(crate) verbose: bool,

    /// Files or folders to upload when the gallery opens
    #[arg(short, long, num_args = 1..)]
    pub(crate) upload: Vec<PathBuf>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// List images in the filtered view
    List {
        /// Filter: all, favorites, or a category name
        #[arg(short, long, default_value = "all")]
        filter: String,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show image counts per filter
    Categories,
    /// Show one image by id
    Show {
        /// Image id
        id: u64,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the config file path
    Config,
}
