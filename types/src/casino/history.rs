use serde::{Deserialize, Serialize};

use super::{RoundOutcome, HISTORY_LIMIT};

/// The most recent completed rounds for one game type, newest first.
///
/// Fixed capacity: once `HISTORY_LIMIT` entries are held, recording a new
/// round evicts the oldest. Insertion order governs eviction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundHistory {
    entries: Vec<RoundOutcome>,
}

impl RoundHistory {
    /// Append a completed round at the front, evicting the oldest entry
    /// if the cap is exceeded.
    pub fn record(&mut self, outcome: RoundOutcome) {
        self.entries.insert(0, outcome);
        self.entries.truncate(HISTORY_LIMIT);
    }

    /// Entries newest first.
    pub fn entries(&self) -> &[RoundOutcome] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
