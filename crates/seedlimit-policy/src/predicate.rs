//! Rule predicates.
//!
//! Each predicate inspects one optional field of a [`Rule`] and reports whether it
//! is configured and, if so, whether the torrent satisfies it. [`PREDICATES`]
//! fixes the order in which they are checked.

use chrono::{DateTime, TimeDelta, Utc};
use seedlimit_types::{Rule, Torrent};

/// Outcome of a single predicate check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Check {
    /// The rule does not set this predicate.
    NotConfigured,
    Satisfied,
    Unsatisfied,
}

impl From<bool> for Check {
    fn from(hit: bool) -> Self {
        if hit {
            Self::Satisfied
        } else {
            Self::Unsatisfied
        }
    }
}

pub(crate) type Predicate = fn(&Rule, &Torrent, DateTime<Utc>) -> Check;

/// Predicates in evaluation order, keyed by the rule field they read.
pub(crate) const PREDICATES: [(&str, Predicate); 9] = [
    ("ratio", ratio),
    ("seeding_time", seeding_time),
    ("activity_time", activity_time),
    ("tag", tag),
    ("category", category),
    ("tracker", tracker),
    ("seeds_gt", seeds_gt),
    ("seeds_lt", seeds_lt),
    ("keyword", keyword),
];

fn ratio(rule: &Rule, torrent: &Torrent, _now: DateTime<Utc>) -> Check {
    if rule.ratio <= 0.0 {
        return Check::NotConfigured;
    }
    (torrent.ratio >= rule.ratio).into()
}

/// Minutes since completion, counted from `completion_on`.
fn seeding_time(rule: &Rule, torrent: &Torrent, now: DateTime<Utc>) -> Check {
    if rule.seeding_time <= 0 {
        return Check::NotConfigured;
    }
    elapsed_since(torrent.completion_on, rule.seeding_time, now).into()
}

/// Minutes since any upload or download activity.
fn activity_time(rule: &Rule, torrent: &Torrent, now: DateTime<Utc>) -> Check {
    if rule.activity_time <= 0 {
        return Check::NotConfigured;
    }
    elapsed_since(torrent.last_activity, rule.activity_time, now).into()
}

fn tag(rule: &Rule, torrent: &Torrent, _now: DateTime<Utc>) -> Check {
    if rule.tag.is_empty() || torrent.tags.is_empty() {
        return Check::NotConfigured;
    }
    torrent
        .tag_list()
        .any(|tag| rule.tag.iter().any(|wanted| wanted == tag))
        .into()
}

fn category(rule: &Rule, torrent: &Torrent, _now: DateTime<Utc>) -> Check {
    if rule.category.is_empty() || torrent.category.is_empty() {
        return Check::NotConfigured;
    }
    rule.category.contains(&torrent.category).into()
}

fn tracker(rule: &Rule, torrent: &Torrent, _now: DateTime<Utc>) -> Check {
    if rule.tracker.is_empty() {
        return Check::NotConfigured;
    }
    match torrent.tracker_host() {
        Some(host) => rule.tracker.contains(&host).into(),
        None => Check::NotConfigured,
    }
}

fn seeds_gt(rule: &Rule, torrent: &Torrent, _now: DateTime<Utc>) -> Check {
    if rule.seeds_gt <= 0 {
        return Check::NotConfigured;
    }
    (torrent.num_complete >= rule.seeds_gt).into()
}

fn seeds_lt(rule: &Rule, torrent: &Torrent, _now: DateTime<Utc>) -> Check {
    if rule.seeds_lt <= 0 {
        return Check::NotConfigured;
    }
    (torrent.num_complete <= rule.seeds_lt).into()
}

fn keyword(rule: &Rule, torrent: &Torrent, _now: DateTime<Utc>) -> Check {
    if rule.keyword.is_empty() {
        return Check::NotConfigured;
    }
    rule.keyword
        .iter()
        .any(|word| torrent.name.contains(word.as_str()))
        .into()
}

/// Whether at least `minutes` have passed since the unix timestamp `since`.
/// Unset or out-of-range timestamps never satisfy.
fn elapsed_since(since: i64, minutes: i64, now: DateTime<Utc>) -> bool {
    if since <= 0 {
        return false;
    }
    let deadline = DateTime::from_timestamp(since, 0)
        .zip(TimeDelta::try_minutes(minutes))
        .and_then(|(start, wait)| start.checked_add_signed(wait));
    match deadline {
        Some(deadline) => now >= deadline,
        None => false,
    }
}
