//! Suppression of decisions the torrent's state already reflects.

use seedlimit_types::{Action, Torrent};

/// Whether `action` should be executed for `torrent`.
///
/// [`Action::Resume`] is also what an unmatched rule list yields, so it only runs
/// for paused torrents and only when `resume_enabled` is set. Pausing a paused
/// torrent is skipped. Every other action runs.
pub fn should_act(torrent: &Torrent, action: Action, resume_enabled: bool) -> bool {
    match action {
        Action::Resume => resume_enabled && torrent.is_paused(),
        Action::Pause => !torrent.is_paused(),
        _ => true,
    }
}
