//! Internal trait abstracting qBittorrent WebUI requests.
//!
//! This module provides the [`WebUiOps`] trait which abstracts the underlying
//! HTTP transport, enabling mocking in tests.

use thiserror::Error;

use crate::conversions::TorrentInfo;

/// Failures of a single WebUI request.
#[derive(Error, Debug)]
pub(crate) enum TransportError {
    /// Login was refused or the session cookie is missing or expired.
    #[error("unauthorized")]
    Unauthorized,

    /// The daemon answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The request never got an answer.
    #[error("network: {0}")]
    Network(String),

    /// The response body could not be decoded.
    #[error("decode: {0}")]
    Decode(String),

    /// The endpoint could not be joined onto the base URL.
    #[error("invalid endpoint: {0}")]
    Endpoint(String),
}

/// Internal trait that abstracts the WebUI requests.
/// This allows for mocking in tests.
#[cfg_attr(test, mockall::automock)]
#[allow(async_fn_in_trait)]
pub(crate) trait WebUiOps {
    /// `POST auth/login`, storing the session cookie on success.
    async fn login(&self, username: &str, password: &str) -> Result<(), TransportError>;
    /// `GET torrents/info`.
    async fn torrents_info(&self) -> Result<Vec<TorrentInfo>, TransportError>;
    /// Form-encoded `POST` to an endpoint relative to `/api/v2/`.
    async fn post(
        &self,
        endpoint: &str,
        form: Vec<(&'static str, String)>,
    ) -> Result<(), TransportError>;
}
