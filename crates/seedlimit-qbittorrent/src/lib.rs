//! # qBittorrent client for seedlimit.
//!
//! usage:
//!
//! ```rust,ignore
//! use seedlimit_qbittorrent::QbittorrentClient;
//! use seedlimit_types::TorrentClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = QbittorrentClient::try_new("http://localhost:8080", "admin", "adminadmin").await?;
//!     for torrent in client.list().await? {
//!         println!("{} {}", torrent.hash, torrent.name);
//!     }
//!     Ok(())
//! }
//! ```
//!

mod client;
mod conversions;
mod ops;
#[cfg(test)]
mod testutil;
mod transport;

pub use client::QbittorrentClient;
pub use transport::HttpTransport;
