//! Question types: the fixed catalog a check-in walks through.

use std::collections::HashSet;

use serde::Serialize;

use super::checkin::RECORD_FIELDS;

/// Errors raised when building a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog has no questions")]
    Empty,

    #[error("duplicate question id: {0}")]
    DuplicateId(String),

    #[error("question id '{0}' is reserved for check-in record fields")]
    ReservedId(String),

    #[error("question '{id}' has an empty scale range [{min}, {max}]")]
    InvertedScale { id: String, min: u8, max: u8 },
}

/// What kind of response a question takes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum QuestionKind {
    /// An integer in `[min, max]`, with a label for each endpoint.
    Scale {
        min: u8,
        max: u8,
        low_label: String,
        high_label: String,
    },

    /// Arbitrary text.
    FreeText { placeholder: String },
}

/// A single assessment item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionSpec {
    /// Stable key. Answers are stored under this id.
    pub id: String,

    /// Short name used when summarizing progress (e.g. "Sleep Quality").
    pub label: String,

    pub prompt: String,
    pub kind: QuestionKind,

    /// Free-text answers surfaced as reflections in the progress report.
    pub featured: bool,
}

impl QuestionSpec {
    /// A 1–10 scale question.
    pub fn scale(
        id: impl Into<String>,
        label: impl Into<String>,
        prompt: impl Into<String>,
        (low_label, high_label): (&str, &str),
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            prompt: prompt.into(),
            kind: QuestionKind::Scale {
                min: 1,
                max: 10,
                low_label: low_label.to_string(),
                high_label: high_label.to_string(),
            },
            featured: false,
        }
    }

    /// A free-text question.
    pub fn free_text(
        id: impl Into<String>,
        label: impl Into<String>,
        prompt: impl Into<String>,
        placeholder: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            prompt: prompt.into(),
            kind: QuestionKind::FreeText {
                placeholder: placeholder.into(),
            },
            featured: false,
        }
    }

    /// Mark this question's answer as a reflection worth surfacing.
    #[must_use]
    pub fn featured(mut self) -> Self {
        self.featured = true;
        self
    }

    pub fn is_scale(&self) -> bool {
        matches!(self.kind, QuestionKind::Scale { .. })
    }
}

/// An ordered, validated list of questions.
///
/// Order is traversal order for the wizard. Ids are unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    questions: Vec<QuestionSpec>,
}

impl Catalog {
    /// Builds a catalog.
    ///
    /// Rejects empty lists, duplicate or reserved ids, and inverted scales.
    pub fn new(questions: Vec<QuestionSpec>) -> Result<Self, CatalogError> {
        if questions.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for q in &questions {
            if RECORD_FIELDS.contains(&q.id.as_str()) {
                return Err(CatalogError::ReservedId(q.id.clone()));
            }
            if !seen.insert(q.id.as_str()) {
                return Err(CatalogError::DuplicateId(q.id.clone()));
            }
            if let QuestionKind::Scale { min, max, .. } = q.kind
                && min > max
            {
                return Err(CatalogError::InvertedScale {
                    id: q.id.clone(),
                    min,
                    max,
                });
            }
        }

        Ok(Self { questions })
    }

    /// The built-in monthly check-in.
    pub fn monthly() -> Self {
        let questions = vec![
            QuestionSpec::scale(
                "mood",
                "Mood",
                "How would you describe your overall mood this month?",
                ("Very Low", "Excellent"),
            ),
            QuestionSpec::scale(
                "stress",
                "Stress Management",
                "How have you been managing stress lately?",
                ("Very Poorly", "Very Well"),
            ),
            QuestionSpec::scale(
                "sleep",
                "Sleep Quality",
                "How satisfied are you with your sleep quality?",
                ("Very Dissatisfied", "Very Satisfied"),
            ),
            QuestionSpec::scale(
                "relationships",
                "Relationships",
                "How connected do you feel to the people in your life?",
                ("Very Disconnected", "Very Connected"),
            ),
            QuestionSpec::scale(
                "purpose",
                "Sense of Purpose",
                "How meaningful and purposeful has your life felt recently?",
                ("Not Meaningful", "Very Meaningful"),
            ),
            QuestionSpec::scale(
                "selfCare",
                "Self Care",
                "How well have you been taking care of yourself?",
                ("Very Poorly", "Very Well"),
            ),
            QuestionSpec::free_text(
                "gratitude",
                "Gratitude",
                "What are three things you're grateful for this month?",
                "Take a moment to reflect on the positive aspects of your life...",
            )
            .featured(),
            QuestionSpec::free_text(
                "challenges",
                "Challenges",
                "What has been your biggest challenge this month, and how did you handle it?",
                "Reflecting on challenges helps us grow and learn...",
            ),
            QuestionSpec::free_text(
                "growth",
                "Personal Growth",
                "What is one thing you learned about yourself this month?",
                "Self-discovery is a continuous journey...",
            )
            .featured(),
            QuestionSpec::free_text(
                "goals",
                "Next Month's Focus",
                "What would you like to focus on improving next month?",
                "Setting intentions helps guide our actions...",
            )
            .featured(),
        ];

        Self { questions }
    }

    pub fn questions(&self) -> &[QuestionSpec] {
        &self.questions
    }

    pub fn get(&self, index: usize) -> Option<&QuestionSpec> {
        self.questions.get(index)
    }

    pub fn find(&self, id: &str) -> Option<&QuestionSpec> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Scale questions in catalog order.
    pub fn scale_questions(&self) -> impl Iterator<Item = &QuestionSpec> {
        self.questions.iter().filter(|q| q.is_scale())
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false: construction rejects empty catalogs.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
