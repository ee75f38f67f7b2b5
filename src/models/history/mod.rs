// History module
// Append-only audit trail attached to each schedule item

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// One recorded field change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Name of the changed field (e.g. `"dates"`)
    pub field: String,
    /// Display form of the value before the change
    pub old_value: String,
    /// Display form of the value after the change
    pub new_value: String,
    /// Display name of whoever made the change
    pub actor: String,
    pub changed_at: DateTime<Local>,
}

impl HistoryEntry {
    pub fn new(
        field: impl Into<String>,
        old_value: impl Into<String>,
        new_value: impl Into<String>,
        actor: impl Into<String>,
        changed_at: DateTime<Local>,
    ) -> Self {
        Self {
            field: field.into(),
            old_value: old_value.into(),
            new_value: new_value.into(),
            actor: actor.into(),
            changed_at,
        }
    }
}

/// Ordered, append-only list of history entries, oldest first.
///
/// There is deliberately no way to remove or reorder entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuditLog {
    entries: Vec<HistoryEntry>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    pub fn extend<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = HistoryEntry>,
    {
        self.entries.extend(entries);
    }

    /// Returns a copy of this log with `entries` appended after the existing ones.
    pub fn appended(&self, entries: &[HistoryEntry]) -> Self {
        let mut log = self.clone();
        log.extend(entries.iter().cloned());
        log
    }

    /// Entries in storage order (oldest first).
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Entries in display order (newest first).
    pub fn newest_first(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }
}

impl From<Vec<HistoryEntry>> for AuditLog {
    fn from(entries: Vec<HistoryEntry>) -> Self {
        Self { entries }
    }
}

impl FromIterator<HistoryEntry> for AuditLog {
    fn from_iter<I: IntoIterator<Item = HistoryEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
