use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
pub struct Args {
    /// Path to the TOML configuration file.
    #[clap(long, env = "MAGPIE_CONFIG", default_value = "config.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Main command: poll the gateway and steer grid charging.
    #[clap(name = "watch")]
    Watch(WatchArgs),

    /// Fetch the gateway state and show the forecast, commanding nothing.
    #[clap(name = "peek")]
    Peek,
}

#[derive(Parser)]
pub struct WatchArgs {
    /// Decide, but never push charge limits to the gateway (dry run).
    #[clap(long)]
    pub scout: bool,
}
