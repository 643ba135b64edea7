//! Argument parser and command definitions.

use clap::{Parser, Subcommand};

/// App catalog browser and installer.
#[derive(Parser)]
#[command(name = "appdeck", version, about)]
pub struct Cli {
    /// Remote manifest URL
    #[arg(long, global = true, env = "APPDECK_MANIFEST_URL")]
    pub manifest_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the catalog and print it
    List,

    /// Check which catalog apps are installed on this host
    Probe,

    /// Download an app and hand it to the host installer
    Install {
        /// Catalog index of the app (as shown by `list`)
        index: usize,
    },

    /// Browse the catalog interactively
    Browse,

    /// Show resolved directories and detected host capabilities
    Paths,
}
