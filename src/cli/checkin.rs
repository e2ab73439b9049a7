//! The check-in command: drive the wizard, then record the result.

use std::collections::HashMap;
use std::io::{self, BufRead, Write};

use crate::config::Config;
use crate::model::{Answer, Catalog, QuestionKind, QuestionSpec};
use crate::storage::Storage;
use crate::store::KvStore;
use crate::wizard::{Wizard, WizardError};

use super::format;

/// Input that moves back one question in interactive mode.
const BACK: &str = ":back";

pub(super) async fn cmd_check_in<S: KvStore>(
    config: &Config,
    storage: &Storage<S>,
    catalog: &Catalog,
    raw_answers: &[String],
) -> Result<(), String> {
    let mut wizard = Wizard::new(catalog);

    if raw_answers.is_empty() {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        answer_interactively(&mut wizard, &mut stdin.lock(), &mut stdout)?;
    } else {
        let pairs = parse_pairs(raw_answers)?;
        answer_from_pairs(&mut wizard, &pairs)?;
    }

    eprintln!("Submitting...");
    let cancel = async {
        // A failed signal handler means no Ctrl-C; just never cancel.
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };
    let submission = match wizard.submit_until(config.acknowledge_delay(), cancel).await {
        Ok(s) => s,
        Err(WizardError::Cancelled) => return Err("check-in cancelled; nothing recorded".into()),
        Err(e) => return Err(format!("failed to submit check-in: {e}")),
    };

    let check_in = storage
        .append_check_in(submission)
        .map_err(|e| format!("failed to record check-in: {e}"))?;

    let short_id = &check_in.id.to_string()[..8];
    println!("{short_id}  wellbeing {:.1}/10", check_in.overall_wellbeing());
    Ok(())
}

/// Split `id=value` flags, rejecting repeats.
fn parse_pairs(raw: &[String]) -> Result<HashMap<&str, &str>, String> {
    let mut pairs = HashMap::new();
    for arg in raw {
        let (id, value) = arg
            .split_once('=')
            .ok_or_else(|| format!("expected ID=VALUE, got '{arg}'"))?;
        if pairs.insert(id.trim(), value).is_some() {
            return Err(format!("'{}' answered more than once", id.trim()));
        }
    }
    Ok(pairs)
}

/// Walk the whole catalog using pre-supplied answers, stopping at the last question.
fn answer_from_pairs(wizard: &mut Wizard<'_>, pairs: &HashMap<&str, &str>) -> Result<(), String> {
    let catalog = wizard.catalog();
    if let Some(unknown) = pairs.keys().find(|id| catalog.find(id).is_none()) {
        return Err(format!("no question with id '{unknown}'"));
    }

    loop {
        let question = wizard
            .current()
            .ok_or("wizard is no longer answering questions")?;
        let raw = pairs
            .get(question.id.as_str())
            .ok_or_else(|| format!("missing --answer for '{}'", question.id))?;
        let answer = parse_answer(question, raw)?;
        wizard
            .answer(&question.id, answer)
            .map_err(|e| e.to_string())?;

        if wizard.is_last() {
            return if wizard.can_advance() {
                Ok(())
            } else {
                Err(WizardError::Unanswered(question.id.clone()).to_string())
            };
        }
        wizard.next().map_err(|e| e.to_string())?;
    }
}

/// Ask each question on `input`, echoing prompts to `output`.
///
/// Invalid answers are reported and the question is asked again.
/// Returns once the last question is satisfied.
fn answer_interactively<R: BufRead, W: Write>(
    wizard: &mut Wizard<'_>,
    input: &mut R,
    output: &mut W,
) -> Result<(), String> {
    let io_err = |e: io::Error| format!("failed to read answer: {e}");

    loop {
        let question = wizard
            .current()
            .ok_or("wizard is no longer answering questions")?;
        let position = wizard
            .position()
            .ok_or("wizard is no longer answering questions")?;

        write!(
            output,
            "{}",
            format::format_question(question, position, wizard.answers().get(&question.id))
        )
        .map_err(io_err)?;
        output.flush().map_err(io_err)?;

        let mut line = String::new();
        if input.read_line(&mut line).map_err(io_err)? == 0 {
            return Err("check-in abandoned before the last question".into());
        }
        let line = line.trim_end_matches(['\n', '\r']);

        if line.trim() == BACK {
            if let Err(e) = wizard.previous() {
                writeln!(output, "{e}").map_err(io_err)?;
            }
            continue;
        }

        // Enter on an already-answered question keeps the earlier answer.
        if !(line.trim().is_empty() && wizard.can_advance()) {
            let outcome = parse_answer(question, line)
                .and_then(|a| wizard.answer(&question.id, a).map_err(|e| e.to_string()));
            if let Err(e) = outcome {
                writeln!(output, "{e}").map_err(io_err)?;
                continue;
            }
        }

        if wizard.is_last() {
            if wizard.can_advance() {
                return Ok(());
            }
            writeln!(output, "An answer is needed before submitting.").map_err(io_err)?;
            continue;
        }
        if let Err(e) = wizard.next() {
            writeln!(output, "{e}").map_err(io_err)?;
        }
    }
}

/// Interpret raw text as an answer of the question's kind.
fn parse_answer(question: &QuestionSpec, raw: &str) -> Result<Answer, String> {
    match &question.kind {
        QuestionKind::Scale { min, max, .. } => raw
            .trim()
            .parse::<u8>()
            .map(Answer::Scale)
            .map_err(|_| format!("'{}' takes a number from {min} to {max}", question.id)),
        QuestionKind::FreeText { .. } => Ok(Answer::Text(raw.to_string())),
    }
}
