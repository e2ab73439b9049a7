//! Persistence for check-ins, journal entries, and the newsletter flag.
//!
//! Every log is one JSON array under one key of a [`KvStore`]:
//!
//! ```text
//! clarity-checkins                 # [CheckIn, ...]       oldest first
//! clarity-journal                  # [JournalEntry, ...]  newest first
//! clarity-newsletter-subscribed    # "true" once subscribed
//! clarity-newsletter-email         # the subscribed address
//! ```
//!
//! Logs are append-only and rewritten whole on every change.

mod checkins;
mod journal;
mod newsletter;

use serde::{Serialize, de::DeserializeOwned};
use tracing::warn;

use crate::model::{JournalError, NewsletterError};
use crate::store::KvStore;

pub const CHECK_INS_KEY: &str = "clarity-checkins";
pub const JOURNAL_KEY: &str = "clarity-journal";
pub const NEWSLETTER_SUBSCRIBED_KEY: &str = "clarity-newsletter-subscribed";
pub const NEWSLETTER_EMAIL_KEY: &str = "clarity-newsletter-email";

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("stored log '{key}' is not valid JSON: {source}")]
    CorruptLog {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Journal(#[from] JournalError),

    #[error(transparent)]
    Newsletter(#[from] NewsletterError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, StorageError>;

/// A log loaded with a fallback: if the stored value couldn't be read, the
/// entries are empty and the reason is kept in `discarded`.
#[derive(Debug)]
pub struct Recovered<T> {
    pub entries: Vec<T>,
    pub discarded: Option<StorageError>,
}

/// Typed access to the logs kept in a key-value store.
pub struct Storage<S> {
    store: S,
}

impl<S: KvStore> Storage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Loads the log under `key`. A missing key is an empty log.
    fn load_log<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        let Some(json) = self.store.load(key)? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&json).map_err(|source| StorageError::CorruptLog {
            key: key.to_string(),
            source,
        })
    }

    /// Like [`Self::load_log`], but substitutes an empty log on failure.
    fn load_log_or_empty<T: DeserializeOwned>(&self, key: &str) -> Recovered<T> {
        match self.load_log(key) {
            Ok(entries) => Recovered {
                entries,
                discarded: None,
            },
            Err(e) => {
                warn!(key, error = %e, "unreadable log, using an empty one");
                Recovered {
                    entries: Vec::new(),
                    discarded: Some(e),
                }
            }
        }
    }

    fn save_log<T: Serialize>(&self, key: &str, entries: &[T]) -> Result<()> {
        let json = serde_json::to_string(entries)?;
        self.store.save(key, &json)?;
        Ok(())
    }
}
