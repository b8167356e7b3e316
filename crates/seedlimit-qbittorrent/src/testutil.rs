//! Shared test utilities and fixtures.

use crate::conversions::TorrentInfo;

pub(crate) fn make_test_info(hash: &str, name: &str) -> TorrentInfo {
    TorrentInfo {
        hash: hash.to_string(),
        name: name.to_string(),
        state: "uploading".to_string(),
        ratio: 0.5,
        completion_on: 1_700_000_000,
        last_activity: 1_700_000_000,
        tags: String::new(),
        category: String::new(),
        tracker: "https://tracker.example.org/announce".to_string(),
        num_complete: 3,
        dl_limit: -1,
        up_limit: -1,
        ratio_limit: -2.0,
        seeding_time_limit: -2,
        inactive_seeding_time_limit: -2,
    }
}
