//! # Seedlimit Types
//!
//! This crate defines the torrent snapshot, the seeding-limit rule model and the
//! [`TorrentClient`] trait implemented by daemon clients.

use thiserror::Error;
use url::Url;

mod rule;

pub use rule::{Action, Limits, Rule, SeedingLimits};

/// Error type for torrent daemon operations.
#[derive(Error, Debug)]
pub enum TorrentClientError {
    /// Network-related errors (connection failures, timeouts, etc.)
    #[error("network error: {0}")]
    Network(String),

    /// Authentication errors
    #[error("authentication required")]
    Unauthorized,

    /// Server returned an error response
    #[error("server error: {0}")]
    ServerError(String),

    /// The daemon returned torrent data that could not be used
    #[error("invalid torrent: {0}")]
    InvalidTorrent(String),

    /// Other unexpected errors
    #[error("unexpected error: {0}")]
    Other(String),
}

/// TorrentClient defines the commands the seeding-limits engine issues to a daemon.
///
/// Every command addresses a single torrent by its info hash.
#[allow(async_fn_in_trait)]
pub trait TorrentClient {
    /// List all torrents known to the daemon.
    async fn list(&self) -> Result<Vec<Torrent>, TorrentClientError>;
    /// Resume (start) a torrent.
    async fn resume(&self, hash: &str) -> Result<(), TorrentClientError>;
    /// Pause (stop) a torrent.
    async fn pause(&self, hash: &str) -> Result<(), TorrentClientError>;
    /// Delete a torrent. If `delete_files` is true, the downloaded data is removed too.
    async fn delete(&self, hash: &str, delete_files: bool) -> Result<(), TorrentClientError>;
    /// Set the download rate cap in bytes per second.
    async fn set_download_limit(&self, hash: &str, limit: i64) -> Result<(), TorrentClientError>;
    /// Set the upload rate cap in bytes per second.
    async fn set_upload_limit(&self, hash: &str, limit: i64) -> Result<(), TorrentClientError>;
    /// Set ratio, seeding-time and inactive-seeding-time limits in one call.
    /// Times are in minutes.
    async fn set_share_limit(
        &self,
        hash: &str,
        ratio: f64,
        seeding_time: i64,
        inactive_seeding_time: i64,
    ) -> Result<(), TorrentClientError>;
    /// Toggle super-seeding mode.
    async fn set_super_seeding(&self, hash: &str, enabled: bool) -> Result<(), TorrentClientError>;
}

/// Torrent snapshot as reported by the daemon.
#[derive(Debug, Clone, Default, PartialEq)]
#[allow(missing_docs)] // rationale: these are the same fields as in the qBittorrent WebUI API
pub struct Torrent {
    pub hash: String,

    pub name: String,

    pub state: String,

    pub ratio: f64,

    /// Unix seconds, non-positive when the torrent never completed.
    pub completion_on: i64,

    /// Unix seconds.
    pub last_activity: i64,

    /// Comma-joined tag list.
    pub tags: String,

    pub category: String,

    /// Current primary tracker URL.
    pub tracker: String,

    /// Number of seeds in the swarm.
    pub num_complete: i64,

    pub dl_limit: i64,

    pub up_limit: i64,

    pub ratio_limit: f64,

    pub seeding_time_limit: i64,

    pub inactive_seeding_time_limit: i64,
}

impl Torrent {
    /// Whether the daemon reports the torrent as paused.
    ///
    /// qBittorrent 5 renamed the paused states to `stoppedUP` / `stoppedDL`.
    pub fn is_paused(&self) -> bool {
        self.state.contains("paused") || self.state.contains("stopped")
    }

    /// Iterates over the individual tags, trimmed.
    pub fn tag_list(&self) -> impl Iterator<Item = &str> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
    }

    /// Host portion of the primary tracker URL, if there is one.
    pub fn tracker_host(&self) -> Option<String> {
        if self.tracker.is_empty() {
            return None;
        }
        Url::parse(&self.tracker)
            .ok()?
            .host_str()
            .filter(|host| !host.is_empty())
            .map(str::to_owned)
    }

    /// The limits currently applied to the torrent.
    pub fn current_limits(&self) -> Limits {
        Limits {
            download: self.dl_limit,
            upload: self.up_limit,
            ratio: self.ratio_limit,
            seeding_time: self.seeding_time_limit,
            inactive_seeding_time: self.inactive_seeding_time_limit,
        }
    }
}
