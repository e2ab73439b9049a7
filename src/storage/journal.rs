//! Journal log: save and load journal entries.

use jiff::Timestamp;
use tracing::info;
use uuid::Uuid;

use crate::model::{JournalDraft, JournalEntry};
use crate::store::KvStore;

use super::{JOURNAL_KEY, Recovered, Result, Storage};

impl<S: KvStore> Storage<S> {
    /// Validates a draft and puts the new entry at the front of the journal.
    pub fn save_journal_entry(&self, draft: JournalDraft) -> Result<JournalEntry> {
        let entry = draft.finish(Uuid::new_v4(), Timestamp::now())?;
        let mut log: Vec<JournalEntry> = self.load_log(JOURNAL_KEY)?;
        log.insert(0, entry.clone());
        self.save_log(JOURNAL_KEY, &log)?;
        info!(id = %entry.id, total = log.len(), "journal entry saved");
        Ok(entry)
    }

    /// Loads the journal, newest entry first.
    pub fn load_journal(&self) -> Result<Vec<JournalEntry>> {
        self.load_log(JOURNAL_KEY)
    }

    /// Loads the journal, substituting an empty one if the stored log is unreadable.
    pub fn load_journal_or_empty(&self) -> Recovered<JournalEntry> {
        self.load_log_or_empty(JOURNAL_KEY)
    }
}
