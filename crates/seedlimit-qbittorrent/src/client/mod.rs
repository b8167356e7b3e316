//! qBittorrent WebUI client implementation.

use tracing::debug;
use url::Url;

use seedlimit_types::{Torrent, TorrentClient, TorrentClientError};

use crate::ops::{TransportError, WebUiOps};
use crate::transport::HttpTransport;


/// QbittorrentClient is a [`TorrentClient`] that uses the qBittorrent WebUI API.
#[allow(missing_debug_implementations, private_bounds)]
pub struct QbittorrentClient<T: WebUiOps = HttpTransport> {
    client: T,
}

impl QbittorrentClient {
    /// Create a new QbittorrentClient.
    ///
    /// This method is async as it logs in on creation. An empty `username` skips the
    /// login, for daemons that bypass authentication for local clients.
    pub async fn try_new(
        webui_url: &str,
        username: &str,
        password: &str,
    ) -> Result<Self, TorrentClientError> {
        let url = Url::parse(webui_url)
            .map_err(|e| TorrentClientError::Other(format!("Invalid WebUI URL: {}", e)))?;

        debug!("Connecting to qBittorrent WebUI at {}", url);
        let client = HttpTransport::new(url).map_err(map_transport_error)?;

        if !username.is_empty() {
            client
                .login(username, password)
                .await
                .map_err(map_transport_error)?;
        }

        debug!("Connected to qBittorrent");
        Ok(Self { client })
    }
}

#[allow(private_bounds)]
impl<T: WebUiOps> QbittorrentClient<T> {
    /// Create a QbittorrentClient with a custom transport implementation.
    /// This is primarily useful for testing with mocks.
    #[cfg(test)]
    pub(crate) fn with_client(client: T) -> Self {
        Self { client }
    }

    async fn send(
        &self,
        endpoint: &str,
        form: Vec<(&'static str, String)>,
    ) -> Result<(), TorrentClientError> {
        debug!("POST {endpoint} {form:?}");
        self.client
            .post(endpoint, form)
            .await
            .map_err(map_transport_error)
    }

    /// qBittorrent 5 renamed `pause`/`resume` to `stop`/`start` and answers 404 on
    /// the old names.
    async fn send_renamed(
        &self,
        legacy: &str,
        current: &str,
        form: Vec<(&'static str, String)>,
    ) -> Result<(), TorrentClientError> {
        debug!("POST {legacy} {form:?}");
        match self.client.post(legacy, form.clone()).await {
            Err(TransportError::Status { status: 404, .. }) => {
                debug!("{legacy} not found, retrying as {current}");
                self.send(current, form).await
            }
            result => result.map_err(map_transport_error),
        }
    }
}

fn hashes(hash: &str) -> (&'static str, String) {
    ("hashes", hash.to_string())
}

#[allow(private_bounds)]
impl<T: WebUiOps> TorrentClient for QbittorrentClient<T> {
    async fn list(&self) -> Result<Vec<Torrent>, TorrentClientError> {
        debug!("Listing torrents");
        let torrents: Vec<Torrent> = self
            .client
            .torrents_info()
            .await
            .map_err(map_transport_error)?
            .into_iter()
            .map(Torrent::from)
            .collect();
        debug!("Listed {} torrents", torrents.len());

        Ok(torrents)
    }

    async fn resume(&self, hash: &str) -> Result<(), TorrentClientError> {
        self.send_renamed("torrents/resume", "torrents/start", vec![hashes(hash)])
            .await
    }

    async fn pause(&self, hash: &str) -> Result<(), TorrentClientError> {
        self.send_renamed("torrents/pause", "torrents/stop", vec![hashes(hash)])
            .await
    }

    async fn delete(&self, hash: &str, delete_files: bool) -> Result<(), TorrentClientError> {
        self.send(
            "torrents/delete",
            vec![hashes(hash), ("deleteFiles", delete_files.to_string())],
        )
        .await
    }

    async fn set_download_limit(&self, hash: &str, limit: i64) -> Result<(), TorrentClientError> {
        self.send(
            "torrents/setDownloadLimit",
            vec![hashes(hash), ("limit", limit.to_string())],
        )
        .await
    }

    async fn set_upload_limit(&self, hash: &str, limit: i64) -> Result<(), TorrentClientError> {
        self.send(
            "torrents/setUploadLimit",
            vec![hashes(hash), ("limit", limit.to_string())],
        )
        .await
    }

    async fn set_share_limit(
        &self,
        hash: &str,
        ratio: f64,
        seeding_time: i64,
        inactive_seeding_time: i64,
    ) -> Result<(), TorrentClientError> {
        self.send(
            "torrents/setShareLimits",
            vec![
                hashes(hash),
                ("ratioLimit", ratio.to_string()),
                ("seedingTimeLimit", seeding_time.to_string()),
                (
                    "inactiveSeedingTimeLimit",
                    inactive_seeding_time.to_string(),
                ),
            ],
        )
        .await
    }

    async fn set_super_seeding(&self, hash: &str, enabled: bool) -> Result<(), TorrentClientError> {
        self.send(
            "torrents/setSuperSeeding",
            vec![hashes(hash), ("value", enabled.to_string())],
        )
        .await
    }
}

/// Maps WebUI transport errors to torrent client errors.
fn map_transport_error(err: TransportError) -> TorrentClientError {
    match err {
        TransportError::Unauthorized => TorrentClientError::Unauthorized,
        TransportError::Status { status, body } => {
            TorrentClientError::ServerError(format!("HTTP {status}: {body}"))
        }
        TransportError::Network(msg) => TorrentClientError::Network(msg),
        TransportError::Decode(msg) => TorrentClientError::Other(msg),
        TransportError::Endpoint(msg) => TorrentClientError::Other(msg),
    }
}
