//! Rule matching.
//!
//! A rule hits when it configures at least one predicate and all of its configured
//! predicates hold. The last hit decides the action. Limits are captured from the
//! first rule reached while the action is still [`Action::Resume`], whether or not
//! that rule scored, and are kept for the rest of the pass.

use chrono::{DateTime, Utc};
use tracing::trace;

use seedlimit_types::{Action, Limits, Rule, Torrent};

use crate::predicate::{Check, PREDICATES};

/// Result of matching a torrent against the rule list.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Decision {
    /// Action to execute.
    pub action: Action,
    /// Limits to apply. Only used when `action` is [`Action::Resume`].
    pub limits: Option<Limits>,
}

/// Matches `torrent` against `rules` as of now.
pub fn evaluate(torrent: &Torrent, rules: &[Rule]) -> Decision {
    evaluate_at(torrent, rules, Utc::now())
}

/// Matches `torrent` against `rules` as of `now`.
pub fn evaluate_at(torrent: &Torrent, rules: &[Rule], now: DateTime<Utc>) -> Decision {
    rules
        .iter()
        .enumerate()
        .fold(Decision::default(), |mut decision, (index, rule)| {
            let Some(score) = score(rule, torrent, now) else {
                return decision;
            };
            if score > 0 {
                trace!(
                    index,
                    score,
                    action = rule.action.code(),
                    hash = %torrent.hash,
                    "rule hit"
                );
                decision.action = rule.action;
            }
            if decision.action == Action::Resume && decision.limits.is_none() {
                decision.limits = rule.limits;
            }
            decision
        })
}

/// Number of satisfied predicates, or `None` as soon as a configured one fails.
fn score(rule: &Rule, torrent: &Torrent, now: DateTime<Utc>) -> Option<usize> {
    let mut score = 0;
    for (field, predicate) in PREDICATES {
        match predicate(rule, torrent, now) {
            Check::NotConfigured => {}
            Check::Satisfied => score += 1,
            Check::Unsatisfied => {
                trace!(field, hash = %torrent.hash, "rule skipped");
                return None;
            }
        }
    }
    Some(score)
}
