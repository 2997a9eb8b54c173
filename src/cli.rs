//! CLI definitions for ReScent.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rescent_release::ReleaseManager;

/// ReScent CLI.
#[derive(Parser)]
#[command(name = "rescent")]
#[command(about = "ReScent extension release tooling and automation harness")]
#[command(version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Create a versioned release from built extension artifacts
    Release {
        /// Release version, e.g. 1.2.3
        version: String,

        /// Build output path recorded in the release
        #[arg(long, default_value = "out/extensions")]
        build_path: PathBuf,

        /// Chrome .crx artifact
        #[arg(long)]
        chrome: Option<PathBuf>,

        /// Firefox .xpi artifact
        #[arg(long)]
        firefox: Option<PathBuf>,

        /// Edge artifact
        #[arg(long)]
        edge: Option<PathBuf>,

        /// Opera .crx artifact
        #[arg(long)]
        opera: Option<PathBuf>,

        /// Releases root directory
        #[arg(long, env = "RESCENT_RELEASES_DIR", default_value = ReleaseManager::RELEASES_FOLDER)]
        releases_dir: PathBuf,
    },

    /// Run the automation engine against a simulated page
    Simulate {
        /// Seconds between page reloads (0 disables refreshing)
        #[arg(long, default_value_t = 30)]
        refresh_time: u64,

        /// Scroll speed factor
        #[arg(long, default_value_t = 5)]
        scroll_speed: u32,

        /// Scroll bottom-to-top continuously
        #[arg(long)]
        continuous_scroll: bool,

        /// How long to run, in seconds
        #[arg(long, default_value_t = 60)]
        duration: u64,
    },
}
