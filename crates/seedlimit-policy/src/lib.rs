//! # Seedlimit Policy
//!
//! Rule-based seeding limits. For each torrent the rule list is matched into a
//! [`Decision`], the [guard](should_act) drops decisions the torrent's state already
//! reflects, and the [executor](execute) sends the remaining commands.
//!
//! usage:
//!
//! ```rust,ignore
//! use seedlimit_policy::enforce_all;
//! use seedlimit_qbittorrent::QbittorrentClient;
//!
//! let client = QbittorrentClient::try_new("http://localhost:8080", "admin", "adminadmin").await?;
//! let summary = enforce_all(&client, &config.seeding_limits).await?;
//! println!("{summary:?}");
//! ```

use tracing::{debug, info};

use seedlimit_types::{SeedingLimits, Torrent, TorrentClient, TorrentClientError};

mod executor;
mod guard;
mod matcher;
mod predicate;
#[cfg(test)]
mod testutil;

pub use executor::{ExecutionReport, execute};
pub use guard::should_act;
pub use matcher::{Decision, evaluate, evaluate_at};

/// A decision that passed the guard, with the report of its execution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Enforced {
    /// The decision that was executed.
    pub decision: Decision,
    /// Commands issued for it.
    pub report: ExecutionReport,
}

/// A decision that would be executed, produced without contacting the torrent.
#[derive(Debug, Clone, PartialEq)]
pub struct Planned {
    /// Info hash of the torrent.
    pub hash: String,
    /// Display name of the torrent.
    pub name: String,
    /// The decision that passed the guard.
    pub decision: Decision,
}

/// Totals for one pass over all torrents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    /// Torrents listed by the daemon.
    pub torrents: usize,
    /// Torrents whose decision was executed.
    pub acted: usize,
    /// Commands sent.
    pub commands: usize,
    /// Commands that failed.
    pub failed: usize,
}

/// Matches `torrent` and applies the guard. `None` means nothing should be done.
pub fn plan(config: &SeedingLimits, torrent: &Torrent) -> Option<Decision> {
    if !config.enable || config.rules.is_empty() {
        return None;
    }

    let decision = evaluate(torrent, &config.rules);
    if !should_act(torrent, decision.action, config.resume) {
        debug!(action = decision.action.code(), hash = %torrent.hash, "nothing to do");
        return None;
    }
    Some(decision)
}

/// Enforces the seeding-limit rules on a single torrent.
pub async fn enforce<C: TorrentClient>(
    client: &C,
    config: &SeedingLimits,
    torrent: &Torrent,
) -> Option<Enforced> {
    let decision = plan(config, torrent)?;

    info!(action = decision.action.code(), name = %torrent.name, "applying seeding limits");
    let report = execute(client, torrent, &decision).await;
    Some(Enforced { decision, report })
}

/// Lists every torrent and enforces the rules on each in turn.
///
/// Only a failed listing is reported as an error; command failures are counted
/// in the summary.
pub async fn enforce_all<C: TorrentClient>(
    client: &C,
    config: &SeedingLimits,
) -> Result<PassSummary, TorrentClientError> {
    let mut summary = PassSummary::default();
    if !config.enable {
        return Ok(summary);
    }

    let torrents = client.list().await?;
    summary.torrents = torrents.len();

    for torrent in &torrents {
        if let Some(enforced) = enforce(client, config, torrent).await {
            summary.acted += 1;
            summary.commands += enforced.report.issued;
            summary.failed += enforced.report.failed;
        }
    }

    debug!(?summary, "pass finished");
    Ok(summary)
}

/// Lists every torrent and returns the decisions [`enforce_all`] would execute.
pub async fn plan_all<C: TorrentClient>(
    client: &C,
    config: &SeedingLimits,
) -> Result<Vec<Planned>, TorrentClientError> {
    if !config.enable {
        return Ok(Vec::new());
    }

    let planned = client
        .list()
        .await?
        .into_iter()
        .filter_map(|torrent| {
            plan(config, &torrent).map(|decision| Planned {
                hash: torrent.hash,
                name: torrent.name,
                decision,
            })
        })
        .collect();

    Ok(planned)
}

#[cfg(test)]
mod tests {
    use seedlimit_types::{Action, Limits, Rule};

    use super::*;
    use crate::testutil::{Call, RecordingClient, make_torrent};

    fn config(resume: bool, rules: Vec<Rule>) -> SeedingLimits {
        SeedingLimits {
            enable: true,
            resume,
            rules,
        }
    }

    fn pause_over_ratio(ratio: f64) -> Rule {
        Rule {
            ratio,
            action: Action::Pause,
            ..Default::default()
        }
    }

    #[test_log::test(tokio::test)]
    async fn test_disabled_feature_does_nothing() {
        let client = RecordingClient::default();
        let torrent = make_torrent("abc123", "uploading");
        let mut config = config(true, vec![pause_over_ratio(1.0)]);
        config.enable = false;

        assert!(enforce(&client, &config, &torrent).await.is_none());
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_rules_do_nothing() {
        let client = RecordingClient::default();
        let torrent = make_torrent("abc123", "pausedUP");

        let enforced = enforce(&client, &config(true, vec![]), &torrent).await;

        assert!(enforced.is_none());
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_pause_matching_torrent() {
        let client = RecordingClient::default();
        let torrent = make_torrent("abc123", "uploading");
        let config = config(false, vec![pause_over_ratio(1.0)]);

        let enforced = enforce(&client, &config, &torrent).await.unwrap();

        assert_eq!(enforced.decision.action, Action::Pause);
        assert_eq!(enforced.report.issued, 1);
        assert_eq!(client.calls(), vec![Call::Pause("abc123".into())]);
    }

    #[tokio::test]
    async fn test_already_paused_torrent_is_not_paused_again() {
        let client = RecordingClient::default();
        let torrent = make_torrent("abc123", "pausedUP");
        let config = config(true, vec![pause_over_ratio(1.0)]);

        let enforced = enforce(&client, &config, &torrent).await;

        assert!(enforced.is_none());
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_no_match_on_paused_torrent_without_resume_flag() {
        let client = RecordingClient::default();
        let torrent = make_torrent("abc123", "pausedUP");
        let config = config(false, vec![pause_over_ratio(9.0)]);

        let enforced = enforce(&client, &config, &torrent).await;

        assert!(enforced.is_none());
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_no_match_on_paused_torrent_resumes_with_flag() {
        let client = RecordingClient::default();
        let torrent = make_torrent("abc123", "pausedUP");
        let limits = Limits {
            upload: 2048,
            ..torrent.current_limits()
        };
        let rules = vec![
            Rule {
                limits: Some(limits),
                ..Default::default()
            },
            pause_over_ratio(9.0),
        ];

        let config = config(true, rules);
        enforce(&client, &config, &torrent).await.unwrap();

        assert_eq!(
            client.calls(),
            vec![
                Call::Resume("abc123".into()),
                Call::UploadLimit("abc123".into(), 2048),
            ]
        );
    }

    #[tokio::test]
    async fn test_no_match_on_running_torrent_is_left_alone() {
        let client = RecordingClient::default();
        let torrent = make_torrent("abc123", "uploading");
        let config = config(true, vec![pause_over_ratio(9.0)]);

        let enforced = enforce(&client, &config, &torrent).await;

        assert!(enforced.is_none());
        assert!(client.calls().is_empty());
    }

    #[test_log::test(tokio::test)]
    async fn test_enforce_all_summarizes_the_pass() {
        let mut low_ratio = make_torrent("low", "uploading");
        low_ratio.ratio = 0.3;
        let client = RecordingClient::with_torrents(vec![
            make_torrent("one", "uploading"),
            make_torrent("two", "pausedUP"),
            low_ratio,
        ]);

        let config = config(false, vec![pause_over_ratio(1.0)]);

        let summary = enforce_all(&client, &config).await.unwrap();

        assert_eq!(
            summary,
            PassSummary {
                torrents: 3,
                acted: 1,
                commands: 1,
                failed: 0,
            }
        );
        assert_eq!(client.calls(), vec![Call::Pause("one".into())]);
    }

    #[tokio::test]
    async fn test_enforce_all_propagates_list_failure() {
        let client = RecordingClient::unreachable();
        let config = config(false, vec![pause_over_ratio(1.0)]);

        let result = enforce_all(&client, &config).await;

        match result.unwrap_err() {
            TorrentClientError::Network(msg) => assert!(msg.contains("connection refused")),
            other => panic!("Expected Network error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_plan_all_sends_no_commands() {
        let client = RecordingClient::with_torrents(vec![
            make_torrent("one", "uploading"),
            make_torrent("two", "pausedUP"),
        ]);
        let rules = vec![Rule {
            category: vec!["shows".into()],
            action: Action::DeleteWithData,
            ..Default::default()
        }];

        let planned = plan_all(&client, &config(false, rules)).await.unwrap();

        assert_eq!(planned.len(), 2);
        assert_eq!(planned[0].hash, "one");
        assert_eq!(planned[1].name, "torrent-two");
        let actions: Vec<_> = planned.iter().map(|p| p.decision.action).collect();
        assert_eq!(actions, vec![Action::DeleteWithData; 2]);
        assert!(client.calls().is_empty());
    }
}
