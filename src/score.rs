//! Wellbeing score: the mean of a check-in's scale answers.

use crate::model::{AnswerSet, Catalog};

/// Value used for a scale question that was never answered.
///
/// This pulls incomplete check-ins toward neutral rather than failing.
pub const UNANSWERED_SCALE_VALUE: u8 = 5;

/// Computes the overall wellbeing score for a set of answers.
///
/// Every scale question in the catalog contributes, in catalog order; a
/// missing answer counts as [`UNANSWERED_SCALE_VALUE`]. A catalog with no
/// scale questions scores the same neutral value.
pub fn wellbeing(catalog: &Catalog, answers: &AnswerSet) -> f64 {
    let values: Vec<f64> = catalog
        .scale_questions()
        .map(|q| f64::from(answers.scale(&q.id).unwrap_or(UNANSWERED_SCALE_VALUE)))
        .collect();

    if values.is_empty() {
        return f64::from(UNANSWERED_SCALE_VALUE);
    }

    #[allow(clippy::cast_precision_loss)] // Catalogs hold a handful of questions.
    let count = values.len() as f64;
    values.iter().sum::<f64>() / count
}
