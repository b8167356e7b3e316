use std::path::PathBuf;

use clap::Parser;

/// Top-level CLI struct for the binary.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub(crate) struct Cli {
    /// Path to the JSON configuration holding the seeding-limit rules.
    #[arg(short, long, env = "SEEDLIMIT_CONFIG", default_value = "config.json")]
    pub config: PathBuf,

    /// qBittorrent WebUI address.
    #[arg(long, env = "QBITTORRENT_URL", default_value = "http://localhost:8080")]
    pub url: String,

    /// WebUI username. Leave empty when the daemon bypasses authentication.
    #[arg(long, env = "QBITTORRENT_USERNAME", default_value = "")]
    pub username: String,

    /// WebUI password.
    #[arg(
        long,
        env = "QBITTORRENT_PASSWORD",
        default_value = "",
        hide_env_values = true
    )]
    pub password: String,

    /// Seconds between passes.
    #[arg(
        short,
        long,
        default_value_t = 300,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub interval: u64,

    /// Run a single pass and exit.
    #[arg(long, default_value_t = false)]
    pub once: bool,

    /// Log the decisions without sending any command.
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}
