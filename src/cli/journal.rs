//! Journal commands: new, list.

use clap::Subcommand;

use crate::model::{DEFAULT_MOOD, JournalDraft};
use crate::storage::Storage;
use crate::store::KvStore;

use super::format::format_journal_entry;

#[derive(Debug, Subcommand)]
pub enum JournalCommand {
    /// Write a new entry. Prints the entry ID.
    New {
        /// A short title for the entry.
        #[arg(long)]
        title: String,

        /// How you're feeling, 1-10.
        #[arg(long, default_value_t = DEFAULT_MOOD)]
        mood: u8,

        /// Your thoughts.
        content: String,
    },

    /// List entries, newest first.
    List,
}

pub(super) fn cmd_new<S: KvStore>(
    storage: &Storage<S>,
    title: String,
    mood: u8,
    content: String,
) -> Result<(), String> {
    let draft = JournalDraft::new(title, content).with_mood(mood);
    let entry = storage
        .save_journal_entry(draft)
        .map_err(|e| format!("failed to save journal entry: {e}"))?;

    println!("{}", entry.id);
    Ok(())
}

pub(super) fn cmd_list<S: KvStore>(storage: &Storage<S>) -> Result<(), String> {
    let recovered = storage.load_journal_or_empty();
    if let Some(e) = &recovered.discarded {
        eprintln!("Warning: ignoring unreadable journal ({e})");
    }

    if recovered.entries.is_empty() {
        println!("No journal entries");
        return Ok(());
    }

    for entry in &recovered.entries {
        println!("{}", format_journal_entry(entry));
    }

    Ok(())
}
