//! Wire format of `torrents/info` and its conversion into [`Torrent`].

use serde::Deserialize;

use seedlimit_types::Torrent;

/// One entry of the `torrents/info` response. Missing fields fall back to their
/// defaults so older daemons still decode.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TorrentInfo {
    pub(crate) hash: String,
    #[serde(default)]
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) state: String,
    #[serde(default)]
    pub(crate) ratio: f64,
    #[serde(default)]
    pub(crate) completion_on: i64,
    #[serde(default)]
    pub(crate) last_activity: i64,
    #[serde(default)]
    pub(crate) tags: String,
    #[serde(default)]
    pub(crate) category: String,
    #[serde(default)]
    pub(crate) tracker: String,
    #[serde(default)]
    pub(crate) num_complete: i64,
    #[serde(default)]
    pub(crate) dl_limit: i64,
    #[serde(default)]
    pub(crate) up_limit: i64,
    #[serde(default = "use_global_ratio")]
    pub(crate) ratio_limit: f64,
    #[serde(default = "use_global_time")]
    pub(crate) seeding_time_limit: i64,
    /// Added in qBittorrent 4.6.
    #[serde(default = "use_global_time")]
    pub(crate) inactive_seeding_time_limit: i64,
}

fn use_global_ratio() -> f64 {
    -2.0
}

fn use_global_time() -> i64 {
    -2
}

impl From<TorrentInfo> for Torrent {
    fn from(value: TorrentInfo) -> Self {
        Self {
            hash: value.hash,
            name: value.name,
            state: value.state,
            ratio: value.ratio,
            completion_on: value.completion_on,
            last_activity: value.last_activity,
            tags: value.tags,
            category: value.category,
            tracker: value.tracker,
            num_complete: value.num_complete,
            dl_limit: value.dl_limit,
            up_limit: value.up_limit,
            ratio_limit: value.ratio_limit,
            seeding_time_limit: value.seeding_time_limit,
            inactive_seeding_time_limit: value.inactive_seeding_time_limit,
        }
    }
}
