//! The check-in wizard: a linear walk over the catalog.
//!
//! The wizard sits on one question at a time. It accepts an answer only for
//! that question, moves forward only once the question is satisfied, and
//! submits only from the last question. Submission computes the wellbeing
//! score, waits for an acknowledgment delay that the caller can cancel, and
//! hands back a [`Submission`] for the caller to persist.
//!
//! ```text
//! AtQuestion(0) ⇄ AtQuestion(1) ⇄ … ⇄ AtQuestion(N-1) → Submitting → Completed
//!                                            ↑               │
//!                                            └── cancelled ──┘
//! ```

use std::fmt;
use std::future;
use std::time::Duration;

use jiff::Timestamp;
use tracing::debug;

use crate::model::{Answer, AnswerSet, Catalog, QuestionKind, QuestionSpec, Submission};
use crate::score;

/// Where the wizard is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardState {
    /// Showing the question at this index.
    AtQuestion(usize),

    /// Waiting on the acknowledgment delay.
    Submitting,

    /// Done. The submission has been handed back.
    Completed,
}

impl fmt::Display for WizardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AtQuestion(i) => write!(f, "at question {}", i + 1),
            Self::Submitting => f.write_str("submitting"),
            Self::Completed => f.write_str("completed"),
        }
    }
}

/// A rejected wizard operation. State is left as it was.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("wizard is {0}, not answering questions")]
    NotAnswering(WizardState),

    #[error("expected an answer for '{expected}', got one for '{got}'")]
    NotCurrentQuestion { expected: String, got: String },

    #[error("'{id}' takes a {expected} answer")]
    KindMismatch { id: String, expected: &'static str },

    #[error("'{id}' takes a value in [{min}, {max}], got {value}")]
    OutOfRange { id: String, value: u8, min: u8, max: u8 },

    #[error("'{0}' has not been answered")]
    Unanswered(String),

    #[error("already at the first question")]
    AtFirstQuestion,

    #[error("already at the last question; submit instead")]
    AtLastQuestion,

    #[error("submit is only available from the last question")]
    NotAtLastQuestion,

    #[error("wizard is {0}, not submitting")]
    NotSubmitting(WizardState),

    #[error("submission was cancelled")]
    Cancelled,
}

/// How far through the catalog the wizard is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// 1-based number of the current question.
    pub number: usize,
    pub total: usize,
}

impl Position {
    /// Share of the catalog reached, counting the current question.
    pub fn percent(&self) -> u8 {
        let pct = (self.number * 100 + self.total / 2) / self.total;
        u8::try_from(pct).unwrap_or(100)
    }
}

/// A single pass through a catalog.
#[derive(Debug)]
pub struct Wizard<'a> {
    catalog: &'a Catalog,
    answers: AnswerSet,
    state: WizardState,
}

impl<'a> Wizard<'a> {
    /// Starts at the first question with no answers.
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            answers: AnswerSet::new(),
            state: WizardState::AtQuestion(0),
        }
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    /// The question being shown, if the wizard is still answering.
    pub fn current(&self) -> Option<&'a QuestionSpec> {
        match self.state {
            WizardState::AtQuestion(i) => self.catalog.get(i),
            WizardState::Submitting | WizardState::Completed => None,
        }
    }

    pub fn position(&self) -> Option<Position> {
        match self.state {
            WizardState::AtQuestion(i) => Some(Position {
                number: i + 1,
                total: self.catalog.len(),
            }),
            WizardState::Submitting | WizardState::Completed => None,
        }
    }

    pub fn is_last(&self) -> bool {
        self.state == WizardState::AtQuestion(self.last_index())
    }

    /// Records an answer for the current question, replacing any earlier one.
    pub fn answer(&mut self, id: &str, value: Answer) -> Result<(), WizardError> {
        let question = self.require_current()?;
        if question.id != id {
            return Err(WizardError::NotCurrentQuestion {
                expected: question.id.clone(),
                got: id.to_string(),
            });
        }

        match (&question.kind, &value) {
            (QuestionKind::Scale { min, max, .. }, Answer::Scale(v)) => {
                if !(*min..=*max).contains(v) {
                    return Err(WizardError::OutOfRange {
                        id: id.to_string(),
                        value: *v,
                        min: *min,
                        max: *max,
                    });
                }
            }
            (QuestionKind::FreeText { .. }, Answer::Text(_)) => {}
            (QuestionKind::Scale { .. }, Answer::Text(_)) => {
                return Err(WizardError::KindMismatch {
                    id: id.to_string(),
                    expected: "numeric",
                });
            }
            (QuestionKind::FreeText { .. }, Answer::Scale(_)) => {
                return Err(WizardError::KindMismatch {
                    id: id.to_string(),
                    expected: "text",
                });
            }
        }

        debug!(question = id, "answered");
        self.answers.upsert(id, value);
        Ok(())
    }

    /// Whether the current question is satisfied.
    ///
    /// A scale question is satisfied by any recorded value. A free-text
    /// question needs text that isn't blank once trimmed.
    pub fn can_advance(&self) -> bool {
        self.current().is_some_and(|q| self.is_satisfied(q))
    }

    /// Moves to the next question.
    pub fn next(&mut self) -> Result<(), WizardError> {
        let index = self.require_index()?;
        if index == self.last_index() {
            return Err(WizardError::AtLastQuestion);
        }
        self.require_satisfied()?;

        self.state = WizardState::AtQuestion(index + 1);
        debug!(state = %self.state, "advanced");
        Ok(())
    }

    /// Moves back one question, keeping every answer.
    pub fn previous(&mut self) -> Result<(), WizardError> {
        let index = self.require_index()?;
        if index == 0 {
            return Err(WizardError::AtFirstQuestion);
        }

        self.state = WizardState::AtQuestion(index - 1);
        debug!(state = %self.state, "went back");
        Ok(())
    }

    /// Submits the check-in, waiting out the acknowledgment delay.
    pub async fn submit(&mut self, delay: Duration) -> Result<Submission, WizardError> {
        self.submit_until(delay, future::pending()).await
    }

    /// Submits the check-in unless `cancel` resolves before the delay elapses.
    ///
    /// On cancellation the wizard returns to the last question with every
    /// answer intact, and [`WizardError::Cancelled`] is returned.
    pub async fn submit_until<C>(
        &mut self,
        delay: Duration,
        cancel: C,
    ) -> Result<Submission, WizardError>
    where
        C: Future<Output = ()>,
    {
        let submission = self.begin_submit()?;

        tokio::select! {
            () = tokio::time::sleep(delay) => {
                self.state = WizardState::Completed;
                debug!(score = submission.overall_wellbeing, "check-in completed");
                Ok(submission)
            }
            () = cancel => {
                self.state = WizardState::AtQuestion(self.last_index());
                debug!("submission cancelled");
                Err(WizardError::Cancelled)
            }
        }
    }

    /// Returns a wizard stuck in `Submitting` to the last question.
    ///
    /// Needed when a submit future is dropped before it resolves.
    pub fn reopen(&mut self) -> Result<(), WizardError> {
        if self.state != WizardState::Submitting {
            return Err(WizardError::NotSubmitting(self.state));
        }
        self.state = WizardState::AtQuestion(self.last_index());
        debug!("reopened after abandoned submission");
        Ok(())
    }

    fn begin_submit(&mut self) -> Result<Submission, WizardError> {
        self.require_index()?;
        if !self.is_last() {
            return Err(WizardError::NotAtLastQuestion);
        }
        self.require_satisfied()?;

        self.state = WizardState::Submitting;
        let overall_wellbeing = score::wellbeing(self.catalog, &self.answers);
        debug!(score = overall_wellbeing, "submitting");

        Ok(Submission {
            answers: self.answers.clone(),
            overall_wellbeing,
            completed_at: Timestamp::now(),
        })
    }

    fn is_satisfied(&self, question: &QuestionSpec) -> bool {
        match self.answers.get(&question.id) {
            Some(Answer::Scale(_)) => true,
            Some(Answer::Text(t)) => !t.trim().is_empty(),
            None => false,
        }
    }

    fn require_index(&self) -> Result<usize, WizardError> {
        match self.state {
            WizardState::AtQuestion(i) => Ok(i),
            other => Err(WizardError::NotAnswering(other)),
        }
    }

    fn require_current(&self) -> Result<&'a QuestionSpec, WizardError> {
        self.current().ok_or(WizardError::NotAnswering(self.state))
    }

    fn require_satisfied(&self) -> Result<(), WizardError> {
        let question = self.require_current()?;
        if self.is_satisfied(question) {
            Ok(())
        } else {
            Err(WizardError::Unanswered(question.id.clone()))
        }
    }

    fn last_index(&self) -> usize {
        self.catalog.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_secs(1);

    fn catalog() -> Catalog {
        Catalog::new(vec![
            QuestionSpec::scale("a", "A", "First?", ("lo", "hi")),
            QuestionSpec::scale("b", "B", "Second?", ("lo", "hi")),
            QuestionSpec::free_text("c", "C", "Third?", "..."),
        ])
        .unwrap()
    }

    #[test]
    fn starts_at_first_question() {
        let catalog = catalog();
        let wizard = Wizard::new(&catalog);

        assert_eq!(wizard.state(), WizardState::AtQuestion(0));
        assert_eq!(wizard.current().unwrap().id, "a");
        assert!(!wizard.can_advance());
        assert!(wizard.answers().is_empty());
    }

    #[test]
    fn previous_at_first_question_is_rejected() {
        let catalog = catalog();
        let mut wizard = Wizard::new(&catalog);

        assert_eq!(wizard.previous(), Err(WizardError::AtFirstQuestion));
        assert_eq!(wizard.state(), WizardState::AtQuestion(0));
    }

    #[test]
    fn next_without_answer_is_rejected() {
        let catalog = catalog();
        let mut wizard = Wizard::new(&catalog);

        assert_eq!(wizard.next(), Err(WizardError::Unanswered("a".into())));
        assert_eq!(wizard.state(), WizardState::AtQuestion(0));
    }

    #[test]
    fn answer_for_other_question_is_rejected() {
        let catalog = catalog();
        let mut wizard = Wizard::new(&catalog);

        let err = wizard.answer("b", Answer::Scale(3)).unwrap_err();

        assert!(matches!(err, WizardError::NotCurrentQuestion { .. }));
        assert!(wizard.answers().is_empty());
    }

    #[test]
    fn answer_of_wrong_kind_is_rejected() {
        let catalog = catalog();
        let mut wizard = Wizard::new(&catalog);

        let err = wizard.answer("a", "seven".into()).unwrap_err();
        assert_eq!(
            err,
            WizardError::KindMismatch {
                id: "a".into(),
                expected: "numeric"
            }
        );
    }

    #[test]
    fn scale_answer_out_of_range_is_rejected() {
        let catalog = catalog();
        let mut wizard = Wizard::new(&catalog);

        assert!(matches!(
            wizard.answer("a", Answer::Scale(0)),
            Err(WizardError::OutOfRange { value: 0, .. })
        ));
        assert!(matches!(
            wizard.answer("a", Answer::Scale(11)),
            Err(WizardError::OutOfRange { value: 11, .. })
        ));
        assert!(wizard.answers().is_empty());
    }

    #[test]
    fn answering_twice_is_idempotent() {
        let catalog = catalog();
        let mut wizard = Wizard::new(&catalog);

        wizard.answer("a", Answer::Scale(8)).unwrap();
        let once = wizard.answers().clone();
        wizard.answer("a", Answer::Scale(8)).unwrap();

        assert_eq!(wizard.answers(), &once);
    }

    #[test]
    fn previous_keeps_answers() {
        let catalog = catalog();
        let mut wizard = Wizard::new(&catalog);

        wizard.answer("a", Answer::Scale(8)).unwrap();
        wizard.next().unwrap();
        wizard.answer("b", Answer::Scale(4)).unwrap();
        wizard.previous().unwrap();

        assert_eq!(wizard.current().unwrap().id, "a");
        assert_eq!(wizard.answers().scale("b"), Some(4));
        assert!(wizard.can_advance());
    }

    #[test]
    fn blank_text_does_not_satisfy() {
        let catalog = catalog();
        let mut wizard = Wizard::new(&catalog);
        wizard.answer("a", Answer::Scale(1)).unwrap();
        wizard.next().unwrap();
        wizard.answer("b", Answer::Scale(1)).unwrap();
        wizard.next().unwrap();

        wizard.answer("c", "".into()).unwrap();
        assert!(!wizard.can_advance());

        wizard.answer("c", "   ".into()).unwrap();
        assert!(!wizard.can_advance());

        wizard.answer("c", " ok ".into()).unwrap();
        assert!(wizard.can_advance());
    }

    #[test]
    fn next_at_last_question_is_rejected() {
        let catalog = catalog();
        let mut wizard = Wizard::new(&catalog);
        wizard.answer("a", Answer::Scale(1)).unwrap();
        wizard.next().unwrap();
        wizard.answer("b", Answer::Scale(1)).unwrap();
        wizard.next().unwrap();
        wizard.answer("c", "done".into()).unwrap();

        assert_eq!(wizard.next(), Err(WizardError::AtLastQuestion));
        assert!(wizard.is_last());
    }

    #[test]
    fn position_tracks_progress() {
        let catalog = catalog();
        let mut wizard = Wizard::new(&catalog);

        let pos = wizard.position().unwrap();
        assert_eq!((pos.number, pos.total, pos.percent()), (1, 3, 33));

        wizard.answer("a", Answer::Scale(5)).unwrap();
        wizard.next().unwrap();
        assert_eq!(wizard.position().unwrap().percent(), 67);
    }

    #[tokio::test(start_paused = true)]
    async fn submit_before_last_question_is_rejected() {
        let catalog = catalog();
        let mut wizard = Wizard::new(&catalog);
        wizard.answer("a", Answer::Scale(5)).unwrap();

        assert_eq!(
            wizard.submit(DELAY).await,
            Err(WizardError::NotAtLastQuestion)
        );
        assert_eq!(wizard.state(), WizardState::AtQuestion(0));
    }

    #[tokio::test(start_paused = true)]
    async fn submit_without_answer_is_rejected() {
        let catalog = catalog();
        let mut wizard = Wizard::new(&catalog);
        wizard.answer("a", Answer::Scale(5)).unwrap();
        wizard.next().unwrap();
        wizard.answer("b", Answer::Scale(5)).unwrap();
        wizard.next().unwrap();

        assert_eq!(
            wizard.submit(DELAY).await,
            Err(WizardError::Unanswered("c".into()))
        );
        assert_eq!(wizard.state(), WizardState::AtQuestion(2));
    }

    #[tokio::test(start_paused = true)]
    async fn full_pass_produces_scored_submission() {
        let catalog = catalog();
        let mut wizard = Wizard::new(&catalog);
        wizard.answer("a", Answer::Scale(8)).unwrap();
        wizard.next().unwrap();
        wizard.answer("b", Answer::Scale(4)).unwrap();
        wizard.next().unwrap();
        wizard.answer("c", "hello".into()).unwrap();

        let submission = wizard.submit(DELAY).await.unwrap();

        assert_eq!(wizard.state(), WizardState::Completed);
        assert!((submission.overall_wellbeing - 6.0).abs() < f64::EPSILON);
        assert_eq!(submission.answers.text("c"), Some("hello"));
        assert_eq!(submission.answers.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn completed_wizard_rejects_further_operations() {
        let catalog = Catalog::new(vec![QuestionSpec::scale("a", "A", "?", ("lo", "hi"))])
            .unwrap();
        let mut wizard = Wizard::new(&catalog);
        wizard.answer("a", Answer::Scale(7)).unwrap();
        wizard.submit(DELAY).await.unwrap();

        assert_eq!(
            wizard.answer("a", Answer::Scale(2)),
            Err(WizardError::NotAnswering(WizardState::Completed))
        );
        assert_eq!(
            wizard.previous(),
            Err(WizardError::NotAnswering(WizardState::Completed))
        );
        assert!(!wizard.can_advance());
        assert_eq!(wizard.answers().scale("a"), Some(7));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_submission_returns_to_last_question() {
        let catalog = Catalog::new(vec![QuestionSpec::scale("a", "A", "?", ("lo", "hi"))])
            .unwrap();
        let mut wizard = Wizard::new(&catalog);
        wizard.answer("a", Answer::Scale(7)).unwrap();

        let result = wizard
            .submit_until(Duration::from_secs(3600), future::ready(()))
            .await;

        assert_eq!(result, Err(WizardError::Cancelled));
        assert_eq!(wizard.state(), WizardState::AtQuestion(0));
        assert_eq!(wizard.answers().scale("a"), Some(7));
    }

    #[test]
    fn reopen_only_from_submitting() {
        let catalog = catalog();
        let mut wizard = Wizard::new(&catalog);

        assert_eq!(
            wizard.reopen(),
            Err(WizardError::NotSubmitting(WizardState::AtQuestion(0)))
        );
    }

    #[test]
    fn abandoned_submission_can_be_reopened() {
        let catalog = Catalog::new(vec![QuestionSpec::scale("a", "A", "?", ("lo", "hi"))])
            .unwrap();
        let mut wizard = Wizard::new(&catalog);
        wizard.answer("a", Answer::Scale(7)).unwrap();

        // The synchronous half of submit, as if its future were then dropped.
        wizard.begin_submit().unwrap();
        assert_eq!(wizard.state(), WizardState::Submitting);
        assert!(wizard.current().is_none());

        wizard.reopen().unwrap();
        assert_eq!(wizard.state(), WizardState::AtQuestion(0));
        assert!(wizard.can_advance());
    }
}
