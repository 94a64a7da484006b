//! Snapshot naming contract: a fixed prefix followed by a sortable
//! seconds-resolution UTC timestamp key.

use chrono::{DateTime, NaiveDateTime, Utc};

use super::SnapshotTrigger;

/// Prefix for startup/manual snapshots.
pub const SNAPSHOT_PREFIX: &str = "words_backup_";

/// Prefix for restore-triggered safety snapshots. Shares the primary prefix
/// so pre-restore copies remain listable and restorable like any other.
pub const PRE_RESTORE_PREFIX: &str = "words_backup_before_restore_";

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const READABLE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Seconds-resolution sortable key for the given instant.
pub fn timestamp_key(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

pub fn collection_name(trigger: SnapshotTrigger, key: &str) -> String {
    let prefix = match trigger {
        SnapshotTrigger::Startup | SnapshotTrigger::Manual => SNAPSHOT_PREFIX,
        SnapshotTrigger::PreRestore => PRE_RESTORE_PREFIX,
    };
    format!("{}{}", prefix, key)
}

/// Whether a collection name follows the snapshot naming convention.
pub fn is_snapshot_collection(name: &str) -> bool {
    name.starts_with(SNAPSHOT_PREFIX)
}

/// Human-readable rendering of a timestamp key. A key that does not parse
/// (e.g. one carrying a collision suffix) is returned as-is: the raw label
/// only affects display, never data integrity.
pub fn readable_time(key: &str) -> String {
    NaiveDateTime::parse_from_str(key, TIMESTAMP_FORMAT)
        .map(|t| t.format(READABLE_FORMAT).to_string())
        .unwrap_or_else(|_| key.to_string())
}
