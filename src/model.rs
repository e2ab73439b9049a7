//! Core data model for Clarity.
//!
//! Questions and the catalog they form, the answers a check-in collects,
//! the records it produces, journal entries, and the newsletter.

mod answer;
mod checkin;
mod journal;
mod newsletter;
mod question;

pub use answer::{Answer, AnswerSet};
pub use checkin::{CheckIn, Submission};
pub use journal::{
    DEFAULT_MOOD, JournalDraft, JournalEntry, JournalError, MoodBand, mood_glyph,
};
pub use newsletter::{NewsletterError, RESOURCES, Resource, Subscription, resources};
pub use question::{Catalog, CatalogError, QuestionKind, QuestionSpec};
