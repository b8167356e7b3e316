//! # seedlimit
//!
//! Enforces seeding-limit rules against a qBittorrent daemon.
//!
//! ## Usage
//!
//! ```sh,ignore
//! cargo run --release --bin seedlimit -- --config config.json --url http://localhost:8080
//! ```

use std::time::Duration;

use clap::Parser;
use tokio::{
    signal::unix::{SignalKind, signal},
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use seedlimit_policy::{enforce_all, plan_all};
use seedlimit_qbittorrent::QbittorrentClient;
use seedlimit_types::{SeedingLimits, TorrentClient, TorrentClientError};

use crate::cli::Cli;
use crate::config::AppConfig;

mod cli;
mod config;

/// Initializes the tracing subscriber.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Spawns and returns the signals listener task.
fn spawn_signal_listener() -> Result<JoinHandle<()>, Box<dyn std::error::Error>> {
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let signals = tokio::spawn(async move {
        tokio::select! {
            _ = sigint.recv() => {},
            _ = sigterm.recv() => {},
        }
    });

    Ok(signals)
}

async fn connect(cli: &Cli) -> Result<QbittorrentClient, TorrentClientError> {
    QbittorrentClient::try_new(&cli.url, &cli.username, &cli.password).await
}

/// Runs one pass over every torrent.
async fn run_pass<C: TorrentClient>(
    client: &C,
    config: &SeedingLimits,
    dry_run: bool,
) -> Result<(), TorrentClientError> {
    if dry_run {
        for planned in plan_all(client, config).await? {
            info!(
                action = planned.decision.action.code(),
                limits = ?planned.decision.limits,
                hash = %planned.hash,
                "dry run: {}",
                planned.name
            );
        }
        return Ok(());
    }

    let summary = enforce_all(client, config).await?;
    info!(
        torrents = summary.torrents,
        acted = summary.acted,
        commands = summary.commands,
        failed = summary.failed,
        "pass complete"
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config)?;
    if !config.seeding_limits.enable {
        warn!("seeding_limits.enable is false, nothing to enforce");
    }

    let mut client = connect(&cli).await?;

    if cli.once {
        run_pass(&client, &config.seeding_limits, cli.dry_run).await?;
        return Ok(());
    }

    let mut signals = spawn_signal_listener()?;
    let mut ticker = time::interval(Duration::from_secs(cli.interval));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match run_pass(&client, &config.seeding_limits, cli.dry_run).await {
                    Ok(()) => {}
                    Err(TorrentClientError::Unauthorized) => {
                        warn!("session expired, logging in again");
                        match connect(&cli).await {
                            Ok(fresh) => client = fresh,
                            Err(e) => error!("login failed: {e}"),
                        }
                    }
                    Err(e) => error!("pass failed: {e}"),
                }
            }
            _ = &mut signals => {
                info!("shutting down");
                break;
            }
        }
    }

    Ok(())
}
