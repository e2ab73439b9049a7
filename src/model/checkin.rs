//! Check-in records: the output of a completed wizard run.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AnswerSet;

/// Keys a stored record uses for its own fields. Answers share the same
/// JSON object, so no question may use one of these as its id.
pub(crate) const RECORD_FIELDS: [&str; 4] = ["id", "date", "overallWellbeing", "completedAt"];

/// What the wizard hands back on completion, before it is persisted.
///
/// The answers are flattened so a stored record is one flat JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    #[serde(flatten)]
    pub answers: AnswerSet,

    /// Mean of the scale answers, computed once at submission.
    pub overall_wellbeing: f64,

    pub completed_at: Timestamp,
}

/// A persisted check-in. Immutable once appended to the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckIn {
    pub id: Uuid,

    /// When the record was appended to the log.
    pub date: Timestamp,

    #[serde(flatten)]
    pub submission: Submission,
}

impl CheckIn {
    /// Seals a submission with an identifier and append time.
    pub fn seal(submission: Submission, id: Uuid, date: Timestamp) -> Self {
        Self {
            id,
            date,
            submission,
        }
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.submission.answers
    }

    pub fn overall_wellbeing(&self) -> f64 {
        self.submission.overall_wellbeing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::Answer;

    #[test]
    fn check_in_serializes_flat() {
        let answers = [
            ("mood".to_string(), Answer::Scale(8)),
            ("gratitude".to_string(), Answer::from("coffee")),
        ]
        .into_iter()
        .collect();
        let check_in = CheckIn::seal(
            Submission {
                answers,
                overall_wellbeing: 8.0,
                completed_at: Timestamp::new(1_700_000_000, 0).unwrap(),
            },
            Uuid::nil(),
            Timestamp::new(1_700_000_001, 0).unwrap(),
        );

        let json = serde_json::to_value(&check_in).unwrap();

        assert_eq!(json["mood"], 8);
        assert_eq!(json["gratitude"], "coffee");
        assert_eq!(json["overallWellbeing"], 8.0);
        assert_eq!(json["completedAt"], "2023-11-14T22:13:20Z");
        assert_eq!(json["date"], "2023-11-14T22:13:21Z");
        assert_eq!(json["id"], Uuid::nil().to_string());
    }

    #[test]
    fn record_fields_cover_every_non_answer_key() {
        let check_in = CheckIn::seal(
            Submission {
                answers: AnswerSet::new(),
                overall_wellbeing: 5.0,
                completed_at: Timestamp::UNIX_EPOCH,
            },
            Uuid::nil(),
            Timestamp::UNIX_EPOCH,
        );

        let json = serde_json::to_value(&check_in).unwrap();
        let mut keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        let mut expected = RECORD_FIELDS.map(String::from).to_vec();
        expected.sort();

        assert_eq!(keys, expected);
    }

    #[test]
    fn check_in_reads_back_flat_json() {
        let json = r#"{
            "id": "00000000-0000-0000-0000-000000000000",
            "date": "2024-03-01T10:00:00Z",
            "mood": 6,
            "goals": "sleep earlier",
            "overallWellbeing": 6.5,
            "completedAt": "2024-03-01T09:59:59Z"
        }"#;

        let check_in: CheckIn = serde_json::from_str(json).unwrap();

        assert_eq!(check_in.answers().scale("mood"), Some(6));
        assert_eq!(check_in.answers().text("goals"), Some("sleep earlier"));
        assert_eq!(check_in.answers().len(), 2);
        assert!((check_in.overall_wellbeing() - 6.5).abs() < f64::EPSILON);
    }
}
