//! reqwest-backed implementation of [`WebUiOps`].

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use tracing::debug;
use url::Url;

use crate::conversions::TorrentInfo;
use crate::ops::{TransportError, WebUiOps};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP transport holding the WebUI session cookie.
#[derive(Debug)]
pub struct HttpTransport {
    http: Client,
    base: Url,
}

impl HttpTransport {
    /// Creates a transport rooted at `base`, the WebUI address.
    pub(crate) fn new(mut base: Url) -> Result<Self, TransportError> {
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let http = Client::builder()
            .cookie_store(true)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Ok(Self { http, base })
    }

    fn endpoint(&self, path: &str) -> Result<Url, TransportError> {
        self.base
            .join(&format!("api/v2/{path}"))
            .map_err(|e| TransportError::Endpoint(format!("{path}: {e}")))
    }

    /// The WebUI rejects requests whose Referer does not match its own origin.
    fn referer(&self) -> String {
        self.base.as_str().to_owned()
    }
}

impl WebUiOps for HttpTransport {
    async fn login(&self, username: &str, password: &str) -> Result<(), TransportError> {
        let url = self.endpoint("auth/login")?;
        debug!("Logging in to {url} as {username}");
        let response = self
            .http
            .post(url)
            .header(reqwest::header::REFERER, self.referer())
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .map_err(network)?;
        let body = check(response).await?.text().await.map_err(network)?;

        // A wrong password still answers 200, with "Fails." as the body.
        if body.trim() != "Ok." {
            return Err(TransportError::Unauthorized);
        }
        Ok(())
    }

    async fn torrents_info(&self) -> Result<Vec<TorrentInfo>, TransportError> {
        let url = self.endpoint("torrents/info")?;
        let response = self
            .http
            .get(url)
            .header(reqwest::header::REFERER, self.referer())
            .send()
            .await
            .map_err(network)?;

        check(response).await?.json().await.map_err(|e| {
            if e.is_decode() {
                TransportError::Decode(e.to_string())
            } else {
                network(e)
            }
        })
    }

    async fn post(
        &self,
        endpoint: &str,
        form: Vec<(&'static str, String)>,
    ) -> Result<(), TransportError> {
        let url = self.endpoint(endpoint)?;
        let response = self
            .http
            .post(url)
            .header(reqwest::header::REFERER, self.referer())
            .form(&form)
            .send()
            .await
            .map_err(network)?;
        check(response).await?;
        Ok(())
    }
}

fn network(err: reqwest::Error) -> TransportError {
    TransportError::Network(err.to_string())
}

/// Maps non-success statuses to errors. qBittorrent answers 403 for a missing or
/// expired session and for banned clients.
async fn check(response: Response) -> Result<Response, TransportError> {
    let status = response.status();
    if status == StatusCode::FORBIDDEN || status == StatusCode::UNAUTHORIZED {
        return Err(TransportError::Unauthorized);
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(TransportError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}
