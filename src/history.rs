use crate::models::HistoryEntry;

/// Most entries the ledger retains; older days fall off the tail.
pub const LEDGER_CAPACITY: usize = 30;

/// Ordered log of finalized days, newest-first, at most one entry per date.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    entries: Vec<HistoryEntry>,
}

impl Ledger {
    /// Rebuilds a ledger from stored entries, re-applying the uniqueness and
    /// capacity rules in case the stored blob predates them.
    pub fn from_entries(entries: Vec<HistoryEntry>) -> Self {
        let mut ledger = Self::default();
        for entry in entries.into_iter().rev() {
            ledger.upsert(entry);
        }
        ledger
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replaces any existing entry for the same date and moves it to the
    /// front, then drops the oldest entries beyond capacity.
    pub fn upsert(&mut self, entry: HistoryEntry) {
        self.entries.retain(|existing| existing.date != entry.date);
        self.entries.insert(0, entry);
        self.entries.truncate(LEDGER_CAPACITY);
    }

    /// Removes the entry for `date` if present. Deleting an absent date is
    /// a no-op, not an error.
    pub fn delete(&mut self, date: &str) {
        self.entries.retain(|entry| entry.date != date);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn find(&self, date: &str) -> Option<&HistoryEntry> {
        self.entries.iter().find(|entry| entry.date == date)
    }
}
