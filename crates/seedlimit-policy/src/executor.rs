//! Translates a [`Decision`] into daemon commands.
//!
//! Command failures are logged and counted, never returned, so one misbehaving
//! torrent cannot stall a pass.

use tracing::{debug, warn};

use seedlimit_types::{Action, Limits, Torrent, TorrentClient, TorrentClientError};

use crate::matcher::Decision;

/// Counts of the commands issued while executing one decision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecutionReport {
    /// Commands sent to the daemon.
    pub issued: usize,
    /// Commands the daemon rejected or that never reached it.
    pub failed: usize,
}

impl ExecutionReport {
    fn record(&mut self, command: &str, hash: &str, result: Result<(), TorrentClientError>) {
        self.issued += 1;
        match result {
            Ok(()) => debug!(command, hash, "command sent"),
            Err(e) => {
                self.failed += 1;
                warn!(command, hash, "command failed: {e}");
            }
        }
    }
}

/// Executes `decision` against `torrent`.
pub async fn execute<C: TorrentClient>(
    client: &C,
    torrent: &Torrent,
    decision: &Decision,
) -> ExecutionReport {
    let hash = torrent.hash.as_str();
    let mut report = ExecutionReport::default();

    match decision.action {
        Action::Resume => {
            report.record("resume", hash, client.resume(hash).await);
            if let Some(limits) = &decision.limits {
                apply_limits(client, torrent, limits, &mut report).await;
            }
        }
        Action::Pause => report.record("pause", hash, client.pause(hash).await),
        Action::Delete => report.record("delete", hash, client.delete(hash, false).await),
        Action::DeleteWithData => {
            report.record("delete", hash, client.delete(hash, true).await);
        }
        Action::SuperSeed => {
            report.record(
                "set_super_seeding",
                hash,
                client.set_super_seeding(hash, true).await,
            );
        }
        Action::Unknown(code) => debug!(code, hash, "ignoring unknown action"),
    }

    report
}

/// Sends only the limit updates whose target differs from the current value.
/// The three share limits travel together.
async fn apply_limits<C: TorrentClient>(
    client: &C,
    torrent: &Torrent,
    target: &Limits,
    report: &mut ExecutionReport,
) {
    let hash = torrent.hash.as_str();
    let current = torrent.current_limits();

    if target.download != current.download {
        report.record(
            "set_download_limit",
            hash,
            client.set_download_limit(hash, target.download).await,
        );
    }
    if target.upload != current.upload {
        report.record(
            "set_upload_limit",
            hash,
            client.set_upload_limit(hash, target.upload).await,
        );
    }

    let share_changed = target.ratio != current.ratio
        || target.seeding_time != current.seeding_time
        || target.inactive_seeding_time != current.inactive_seeding_time;
    if share_changed {
        report.record(
            "set_share_limit",
            hash,
            client
                .set_share_limit(
                    hash,
                    target.ratio,
                    target.seeding_time,
                    target.inactive_seeding_time,
                )
                .await,
        );
    }
}
