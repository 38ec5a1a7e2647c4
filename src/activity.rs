//! Activity log for taba.
//!
//! A bounded, newest-first history of board mutations. The log keeps at
//! most [`ACTIVITY_CAP`] entries; recording the 51st evicts the oldest.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Maximum number of retained entries.
pub const ACTIVITY_CAP: usize = 50;

/// Category of board mutation an entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityAction {
    Create,
    Edit,
    Move,
    Delete,
    Reset,
}

impl fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActivityAction::Create => "create",
            ActivityAction::Edit => "edit",
            ActivityAction::Move => "move",
            ActivityAction::Delete => "delete",
            ActivityAction::Reset => "reset",
        };
        f.write_str(name)
    }
}

/// One recorded board mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub action: ActivityAction,
    pub details: String,
    pub timestamp: DateTime<Utc>,
}

impl Activity {
    pub fn new(action: ActivityAction, details: impl Into<String>) -> Self {
        Self {
            id: Ulid::new().to_string(),
            action,
            details: details.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Bounded newest-first activity history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityLog {
    entries: Vec<Activity>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a log from persisted entries, enforcing the cap.
    pub fn from_entries(mut entries: Vec<Activity>) -> Self {
        entries.truncate(ACTIVITY_CAP);
        Self { entries }
    }

    /// Prepend a new entry, evicting the oldest when over the cap.
    pub fn record(&mut self, action: ActivityAction, details: impl Into<String>) -> &Activity {
        self.entries.insert(0, Activity::new(action, details));
        self.entries.truncate(ACTIVITY_CAP);
        &self.entries[0]
    }

    /// Entries newest-first.
    pub fn entries(&self) -> &[Activity] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_prepends_newest_first() {
        let mut log = ActivityLog::new();
        log.record(ActivityAction::Create, "first");
        log.record(ActivityAction::Edit, "second");

        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0].details, "second");
        assert_eq!(log.entries()[0].action, ActivityAction::Edit);
        assert_eq!(log.entries()[1].details, "first");
    }

    #[test]
    fn cap_evicts_oldest() {
        let mut log = ActivityLog::new();
        for i in 0..ACTIVITY_CAP + 5 {
            log.record(ActivityAction::Create, format!("entry {i}"));
        }

        assert_eq!(log.len(), ACTIVITY_CAP);
        // Newest entry survives at the head
        assert_eq!(log.entries()[0].details, format!("entry {}", ACTIVITY_CAP + 4));
        // Entries 0..5 were evicted
        assert_eq!(log.entries()[ACTIVITY_CAP - 1].details, "entry 5");
    }

    #[test]
    fn clear_empties_log() {
        let mut log = ActivityLog::new();
        log.record(ActivityAction::Reset, "reset");
        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn from_entries_enforces_cap() {
        let entries: Vec<Activity> = (0..ACTIVITY_CAP + 10)
            .map(|i| Activity::new(ActivityAction::Create, format!("e{i}")))
            .collect();
        let log = ActivityLog::from_entries(entries);
        assert_eq!(log.len(), ACTIVITY_CAP);
    }

    #[test]
    fn action_serializes_lowercase() {
        let json = serde_json::to_string(&ActivityAction::Move).expect("serialize");
        assert_eq!(json, "\"move\"");
    }
}
