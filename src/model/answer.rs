//! Answer types: responses keyed by question id.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A response to one question.
///
/// Untagged so a stored record reads as plain JSON: numbers for scale
/// answers, strings for free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Scale(u8),
    Text(String),
}

impl Answer {
    pub fn as_scale(&self) -> Option<u8> {
        match self {
            Self::Scale(v) => Some(*v),
            Self::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Scale(_) => None,
            Self::Text(t) => Some(t),
        }
    }
}

impl From<u8> for Answer {
    fn from(value: u8) -> Self {
        Self::Scale(value)
    }
}

impl From<&str> for Answer {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Answers collected so far, keyed by question id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<String, Answer>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&Answer> {
        self.0.get(id)
    }

    /// Inserts or replaces the answer for `id`.
    pub(crate) fn upsert(&mut self, id: &str, answer: Answer) {
        self.0.insert(id.to_string(), answer);
    }

    pub fn scale(&self, id: &str) -> Option<u8> {
        self.get(id).and_then(Answer::as_scale)
    }

    pub fn text(&self, id: &str) -> Option<&str> {
        self.get(id).and_then(Answer::as_text)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Answer)> for AnswerSet {
    fn from_iter<T: IntoIterator<Item = (String, Answer)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
