//! Progress across check-ins: latest versus previous, per metric.
//!
//! Everything here is recomputed from the full log on each call.

use jiff::Timestamp;
use serde::Serialize;

use crate::model::{Catalog, CheckIn};

/// Direction of change from the previous check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    /// Flat unless both values exist and differ.
    pub fn between(current: Option<f64>, previous: Option<f64>) -> Self {
        match (current, previous) {
            (Some(c), Some(p)) if c > p => Self::Up,
            (Some(c), Some(p)) if c < p => Self::Down,
            _ => Self::Flat,
        }
    }
}

/// One tracked value in the latest check-in, compared with the one before.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricProgress {
    pub id: String,
    pub label: String,
    pub current: Option<f64>,
    pub previous: Option<f64>,
    /// `current - previous`, when both exist.
    pub delta: Option<f64>,
    pub trend: Trend,
}

impl MetricProgress {
    fn new(id: &str, label: &str, current: Option<f64>, previous: Option<f64>) -> Self {
        let delta = current.zip(previous).map(|(c, p)| c - p);
        Self {
            id: id.to_string(),
            label: label.to_string(),
            current,
            previous,
            delta,
            trend: Trend::between(current, previous),
        }
    }
}

/// A featured free-text answer from the latest check-in, passed through as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reflection {
    pub id: String,
    pub label: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressReport {
    pub check_in_count: usize,
    pub overall: MetricProgress,
    /// Scale questions, in catalog order.
    pub metrics: Vec<MetricProgress>,
    /// Featured free-text answers that were filled in.
    pub reflections: Vec<Reflection>,
}

/// Id used for the overall score in a report.
pub const OVERALL_ID: &str = "overallWellbeing";

/// Compares the last check-in in `log` with the one before it.
///
/// Returns `None` when the log is empty.
pub fn report(catalog: &Catalog, log: &[CheckIn]) -> Option<ProgressReport> {
    let (latest, earlier) = log.split_last()?;
    let previous = earlier.last();

    let overall = MetricProgress::new(
        OVERALL_ID,
        "Overall Wellbeing",
        Some(latest.overall_wellbeing()),
        previous.map(CheckIn::overall_wellbeing),
    );

    let metrics = catalog
        .scale_questions()
        .map(|q| {
            let value = |c: &CheckIn| c.answers().scale(&q.id).map(f64::from);
            MetricProgress::new(&q.id, &q.label, value(latest), previous.and_then(value))
        })
        .collect();

    let reflections = catalog
        .questions()
        .iter()
        .filter(|q| q.featured)
        .filter_map(|q| {
            let text = latest.answers().text(&q.id)?;
            (!text.is_empty()).then(|| Reflection {
                id: q.id.clone(),
                label: q.label.clone(),
                text: text.to_string(),
            })
        })
        .collect();

    Some(ProgressReport {
        check_in_count: log.len(),
        overall,
        metrics,
        reflections,
    })
}

/// At-a-glance summary of the check-in log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Overview {
    pub check_in_count: usize,
    /// Whole days since the last check-in was recorded.
    pub days_since_last: Option<i64>,
    /// Latest wellbeing score, rounded to a whole number.
    pub latest_score: Option<u8>,
    /// Trends need at least two check-ins.
    pub trends_available: bool,
}

pub fn overview(log: &[CheckIn], now: Timestamp) -> Overview {
    let last = log.last();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // Scores lie in [1, 10].
    let latest_score = last.map(|c| c.overall_wellbeing().round() as u8);
    Overview {
        check_in_count: log.len(),
        days_since_last: last.map(|c| now.duration_since(c.date).as_secs().div_euclid(86_400)),
        latest_score,
        trends_available: log.len() > 1,
    }
}
