//! Seeding-limit rules as read from the configuration file.

use serde::{Deserialize, Serialize};

/// Action selected by a matching rule.
///
/// Serialized as the integer action code used by the configuration file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum Action {
    /// Code 0: resume the torrent and apply the rule's limits.
    #[default]
    Resume,
    /// Code 1: pause the torrent.
    Pause,
    /// Code 2: delete the torrent, keeping downloaded data.
    Delete,
    /// Code 3: delete the torrent together with its data.
    DeleteWithData,
    /// Code 4: enable super-seeding.
    SuperSeed,
    /// Any other code. Never executed.
    Unknown(i64),
}

impl Action {
    /// Integer code of the action.
    pub fn code(self) -> i64 {
        self.into()
    }
}

impl From<i64> for Action {
    fn from(code: i64) -> Self {
        match code {
            0 => Self::Resume,
            1 => Self::Pause,
            2 => Self::Delete,
            3 => Self::DeleteWithData,
            4 => Self::SuperSeed,
            other => Self::Unknown(other),
        }
    }
}

impl From<Action> for i64 {
    fn from(action: Action) -> Self {
        match action {
            Action::Resume => 0,
            Action::Pause => 1,
            Action::Delete => 2,
            Action::DeleteWithData => 3,
            Action::SuperSeed => 4,
            Action::Unknown(code) => code,
        }
    }
}

/// Target limits applied when a decision resumes a torrent.
///
/// Rates are bytes per second, times are minutes. The rates default to `-1`,
/// which the daemon reports for "unlimited". The share fields default to `-2`,
/// qBittorrent's "use global limit".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Download rate cap.
    pub download: i64,
    /// Upload rate cap.
    pub upload: i64,
    /// Share ratio limit.
    pub ratio: f64,
    /// Seeding time limit.
    pub seeding_time: i64,
    /// Inactive seeding time limit.
    pub inactive_seeding_time: i64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            download: -1,
            upload: -1,
            ratio: -2.0,
            seeding_time: -2,
            inactive_seeding_time: -2,
        }
    }
}

/// A single seeding-limit rule. Every predicate is optional: zero or empty means unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rule {
    /// Minimum share ratio.
    pub ratio: f64,
    /// Minimum minutes since the download completed.
    pub seeding_time: i64,
    /// Minimum minutes since the last upload or download activity.
    pub activity_time: i64,
    /// Tags, any of which must be on the torrent.
    pub tag: Vec<String>,
    /// Categories, one of which must be the torrent's.
    pub category: Vec<String>,
    /// Tracker hosts, one of which must be the torrent's primary tracker.
    pub tracker: Vec<String>,
    /// Minimum number of seeds.
    pub seeds_gt: i64,
    /// Maximum number of seeds.
    pub seeds_lt: i64,
    /// Keywords, any of which must appear in the torrent name.
    pub keyword: Vec<String>,
    /// Action to take when every configured predicate holds.
    pub action: Action,
    /// Limits applied when the decision resumes the torrent.
    pub limits: Option<Limits>,
}

impl Rule {
    /// Whether any predicate is configured. Rules without one never match.
    pub fn has_predicates(&self) -> bool {
        self.ratio > 0.0
            || self.seeding_time > 0
            || self.activity_time > 0
            || !self.tag.is_empty()
            || !self.category.is_empty()
            || !self.tracker.is_empty()
            || self.seeds_gt > 0
            || self.seeds_lt > 0
            || !self.keyword.is_empty()
    }
}

/// The seeding-limits feature section of the configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedingLimits {
    /// Master switch for the feature.
    pub enable: bool,
    /// Resume paused torrents when the decision is action 0.
    pub resume: bool,
    /// Ordered rules; later matches override earlier ones.
    pub rules: Vec<Rule>,
}
