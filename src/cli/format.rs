//! Output formatting for CLI display.

use jiff::tz::TimeZone;

use crate::model::{
    Answer, Catalog, JournalEntry, MoodBand, QuestionKind, QuestionSpec, Resource, Subscription,
    mood_glyph,
};
use crate::progress::{MetricProgress, Overview, ProgressReport, Trend};
use crate::wizard::Position;

pub(super) fn format_catalog(catalog: &Catalog) -> String {
    catalog
        .questions()
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let kind = match &q.kind {
                QuestionKind::Scale { min, max, .. } => format!("{min}-{max}"),
                QuestionKind::FreeText { .. } => "text".to_string(),
            };
            format!("{:>2}. {:<14} [{kind}]  {}\n", i + 1, q.id, q.prompt)
        })
        .collect()
}

/// The prompt shown for one question during an interactive check-in.
pub(super) fn format_question(
    question: &QuestionSpec,
    position: Position,
    existing: Option<&Answer>,
) -> String {
    let mut out = format!(
        "\nQuestion {} of {} ({}% complete)\n{}\n",
        position.number,
        position.total,
        position.percent(),
        question.prompt
    );

    let hint = match &question.kind {
        QuestionKind::Scale {
            min,
            max,
            low_label,
            high_label,
        } => format!("  {min} = {low_label}, {max} = {high_label}\n"),
        QuestionKind::FreeText { placeholder } => format!("  {placeholder}\n"),
    };
    out.push_str(&hint);

    let current = match existing {
        Some(Answer::Scale(v)) => Some(v.to_string()),
        Some(Answer::Text(t)) if !t.trim().is_empty() => Some(t.clone()),
        _ => None,
    };
    if let Some(current) = current {
        out.push_str(&format!(
            "  (current answer: {current}; press Enter to keep it)\n"
        ));
    }

    out.push_str("> ");
    out
}

pub(super) fn format_report(report: &ProgressReport) -> String {
    let plural = if report.check_in_count == 1 { "" } else { "s" };
    let mut out = format!(
        "Tracking your wellness journey across {} check-in{plural}\n\n",
        report.check_in_count
    );

    let overall = &report.overall;
    out.push_str(&format!(
        "Overall wellbeing  {:.1}/10",
        overall.current.unwrap_or_default()
    ));
    if let Some(delta) = overall.delta {
        out.push_str(&format!("  {}{delta:.1} from last month", sign(delta)));
    }
    out.push_str("\n\n");

    for metric in &report.metrics {
        out.push_str(&format_metric(metric));
    }

    if !report.reflections.is_empty() {
        out.push_str("\nRecent reflections\n");
        for r in &report.reflections {
            out.push_str(&format!("\n  {}\n  {}\n", r.label, r.text));
        }
    }

    out
}

fn format_metric(metric: &MetricProgress) -> String {
    let current = metric
        .current
        .map_or_else(|| "--".to_string(), |v| format!("{v}"));
    let change = metric
        .delta
        .map(|delta| format!("  {}{delta} from last check-in", sign(delta)))
        .unwrap_or_default();
    format!(
        "  {} {:<18} {current:>2}/10{change}\n",
        trend_glyph(metric.trend),
        metric.label
    )
}

fn trend_glyph(trend: Trend) -> &'static str {
    match trend {
        Trend::Up => "↑",
        Trend::Down => "↓",
        Trend::Flat => "·",
    }
}

/// Explicit plus for gains; negatives carry their own sign.
fn sign(delta: f64) -> &'static str {
    if delta > 0.0 { "+" } else { "" }
}

pub(super) fn format_overview(overview: &Overview) -> String {
    let last = match overview.days_since_last {
        Some(days) => format!("Last check-in {days} days ago"),
        None => "No check-ins yet".to_string(),
    };
    let growth = if overview.trends_available {
        "Tracking: progress insights available"
    } else {
        "Ready: complete 2+ check-ins to see trends"
    };
    let wellness = match overview.latest_score {
        Some(score) => format!("{score} (current wellness score)"),
        None => "-- (complete a check-in)".to_string(),
    };

    format!(
        "Check-ins  {}\n           {last}\nGrowth     {growth}\nWellness   {wellness}\n",
        overview.check_in_count
    )
}

pub(super) fn format_journal_entry(entry: &JournalEntry) -> String {
    let date = entry.date.to_zoned(TimeZone::system()).strftime("%B %-d, %Y");
    let band = match MoodBand::of(entry.mood) {
        MoodBand::Low => "low",
        MoodBand::Steady => "steady",
        MoodBand::High => "high",
    };
    format!(
        "{}  {date}  {} {}/10 ({band})\n{}\n",
        entry.title,
        mood_glyph(entry.mood),
        entry.mood,
        entry.content
    )
}

pub(super) fn format_subscription(subscription: &Subscription) -> String {
    match subscription {
        Subscription::NotSubscribed => "Not subscribed".to_string(),
        Subscription::Subscribed { email: Some(email) } => format!("Subscribed as {email}"),
        Subscription::Subscribed { email: None } => "Subscribed".to_string(),
    }
}

pub(super) fn format_resource(resource: &Resource) -> String {
    format!(
        "{} ({}, {} min read)\n  {}",
        resource.title, resource.category, resource.read_minutes, resource.description
    )
}
