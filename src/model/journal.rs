//! Journal types: free-form private entries.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Mood recorded on a new entry when none is given.
pub const DEFAULT_MOOD: u8 = 5;

/// Reasons a draft can't be saved.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum JournalError {
    #[error("journal entry needs a title")]
    MissingTitle,

    #[error("journal entry needs some content")]
    MissingContent,

    #[error("mood {0} is outside 1-10")]
    MoodOutOfRange(u8),
}

/// A saved journal entry. Never edited after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: Uuid,
    pub date: Timestamp,
    pub title: String,
    pub content: String,
    pub mood: u8,
}

/// An entry being written, not yet saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalDraft {
    pub title: String,
    pub content: String,
    pub mood: u8,
}

impl JournalDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            mood: DEFAULT_MOOD,
        }
    }

    #[must_use]
    pub fn with_mood(mut self, mood: u8) -> Self {
        self.mood = mood;
        self
    }

    /// Validates the draft and stamps it into an entry.
    ///
    /// Title and content are stored as written; only their trimmed form
    /// must be non-empty.
    pub fn finish(self, id: Uuid, date: Timestamp) -> Result<JournalEntry, JournalError> {
        if self.title.trim().is_empty() {
            return Err(JournalError::MissingTitle);
        }
        if self.content.trim().is_empty() {
            return Err(JournalError::MissingContent);
        }
        if !(1..=10).contains(&self.mood) {
            return Err(JournalError::MoodOutOfRange(self.mood));
        }
        Ok(JournalEntry {
            id,
            date,
            title: self.title,
            content: self.content,
            mood: self.mood,
        })
    }
}

/// Coarse grouping of a 1–10 mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoodBand {
    Low,
    Steady,
    High,
}

impl MoodBand {
    pub fn of(mood: u8) -> Self {
        match mood {
            0..=3 => Self::Low,
            4..=6 => Self::Steady,
            _ => Self::High,
        }
    }
}

/// A face for the mood, in two-point steps.
pub fn mood_glyph(mood: u8) -> &'static str {
    match mood {
        0..=2 => "😢",
        3..=4 => "😕",
        5..=6 => "😐",
        7..=8 => "😊",
        _ => "😄",
    }
}
