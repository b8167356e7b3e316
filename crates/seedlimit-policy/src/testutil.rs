//! Shared test utilities and fixtures.

use std::sync::Mutex;

use seedlimit_types::{Torrent, TorrentClient, TorrentClientError};

/// A command received by [`RecordingClient`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Resume(String),
    Pause(String),
    Delete(String, bool),
    DownloadLimit(String, i64),
    UploadLimit(String, i64),
    ShareLimit(String, f64, i64, i64),
    SuperSeeding(String, bool),
}

/// Records every command and fails the ones named in `failing`.
#[derive(Debug, Default)]
pub(crate) struct RecordingClient {
    torrents: Vec<Torrent>,
    failing: Vec<&'static str>,
    list_fails: bool,
    calls: Mutex<Vec<Call>>,
}

impl RecordingClient {
    pub(crate) fn with_torrents(torrents: Vec<Torrent>) -> Self {
        Self {
            torrents,
            ..Default::default()
        }
    }

    pub(crate) fn failing(commands: &[&'static str]) -> Self {
        Self {
            failing: commands.to_vec(),
            ..Default::default()
        }
    }

    pub(crate) fn unreachable() -> Self {
        Self {
            list_fails: true,
            ..Default::default()
        }
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn push(&self, command: &'static str, call: Call) -> Result<(), TorrentClientError> {
        self.calls.lock().unwrap().push(call);
        if self.failing.contains(&command) {
            let message = format!("{command} rejected");
            return Err(TorrentClientError::ServerError(message));
        }
        Ok(())
    }
}

impl TorrentClient for RecordingClient {
    async fn list(&self) -> Result<Vec<Torrent>, TorrentClientError> {
        if self.list_fails {
            return Err(TorrentClientError::Network("connection refused".into()));
        }
        Ok(self.torrents.clone())
    }

    async fn resume(&self, hash: &str) -> Result<(), TorrentClientError> {
        self.push("resume", Call::Resume(hash.into()))
    }

    async fn pause(&self, hash: &str) -> Result<(), TorrentClientError> {
        self.push("pause", Call::Pause(hash.into()))
    }

    async fn delete(&self, hash: &str, delete_files: bool) -> Result<(), TorrentClientError> {
        self.push("delete", Call::Delete(hash.into(), delete_files))
    }

    async fn set_download_limit(&self, hash: &str, limit: i64) -> Result<(), TorrentClientError> {
        self.push(
            "set_download_limit",
            Call::DownloadLimit(hash.into(), limit),
        )
    }

    async fn set_upload_limit(&self, hash: &str, limit: i64) -> Result<(), TorrentClientError> {
        self.push("set_upload_limit", Call::UploadLimit(hash.into(), limit))
    }

    async fn set_share_limit(
        &self,
        hash: &str,
        ratio: f64,
        seeding_time: i64,
        inactive_seeding_time: i64,
    ) -> Result<(), TorrentClientError> {
        self.push(
            "set_share_limit",
            Call::ShareLimit(hash.into(), ratio, seeding_time, inactive_seeding_time),
        )
    }

    async fn set_super_seeding(&self, hash: &str, enabled: bool) -> Result<(), TorrentClientError> {
        self.push(
            "set_super_seeding",
            Call::SuperSeeding(hash.into(), enabled),
        )
    }
}

pub(crate) fn make_torrent(hash: &str, state: &str) -> Torrent {
    Torrent {
        hash: hash.to_string(),
        name: format!("torrent-{hash}"),
        state: state.to_string(),
        ratio: 1.2,
        completion_on: 1_600_000_000,
        last_activity: 1_600_000_000,
        tags: "tv".to_string(),
        category: "shows".to_string(),
        tracker: "https://tracker.example.org/announce".to_string(),
        num_complete: 12,
        dl_limit: -1,
        up_limit: -1,
        ratio_limit: -2.0,
        seeding_time_limit: -2,
        inactive_seeding_time_limit: -2,
    }
}
