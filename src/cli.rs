//! CLI interface for Clarity.
//!
//! Each subcommand reads or appends to the local logs and prints a
//! human-readable summary. `check-in` walks the question catalog, either
//! from `--answer` flags or interactively on stdin.

mod checkin;
mod format;
mod journal;
mod newsletter;

use clap::{Parser, Subcommand};
use jiff::Timestamp;

use crate::config::Config;
use crate::model::Catalog;
use crate::progress;
use crate::storage::Storage;
use crate::store::KvStore;

use journal::JournalCommand;
use newsletter::NewsletterCommand;

/// Clarity: monthly check-ins with yourself.
#[derive(Debug, Parser)]
#[command(name = "clarity", version, after_long_help = WORKFLOW_HELP)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

const WORKFLOW_HELP: &str = r#"Workflow: a monthly check-in
  1. clarity questions
  2. clarity check-in
     → answers each question in turn (type :back to revisit one)
  3. clarity progress
     → compares this check-in with the last one

Non-interactive:
  clarity check-in --answer mood=7 --answer stress=5 ... --answer goals="Sleep earlier"

Journal:
  clarity journal new --title "Sunday" --mood 8 "A long walk by the river."
  clarity journal list"#;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the check-in questions in order.
    Questions {
        /// Print the questions as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Complete a check-in and record it.
    ///
    /// With no `--answer` flags, asks each question on stdin.
    CheckIn {
        /// An answer as `id=value`. Repeat for every question.
        #[arg(long = "answer", value_name = "ID=VALUE")]
        answers: Vec<String>,
    },

    /// Compare the latest check-in with the one before it.
    Progress {
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Summarize the check-in history.
    Overview,

    /// Write and read private journal entries.
    Journal {
        #[command(subcommand)]
        command: JournalCommand,
    },

    /// Manage the newsletter subscription.
    Newsletter {
        #[command(subcommand)]
        command: NewsletterCommand,
    },
}

/// Run the CLI, returning an error message on failure.
pub async fn run<S: KvStore>(config: &Config, storage: &Storage<S>) -> Result<(), String> {
    let cli = Cli::parse();
    let catalog = Catalog::monthly();

    match cli.command {
        Command::Questions { json } => cmd_questions(&catalog, json),
        Command::CheckIn { answers } => {
            checkin::cmd_check_in(config, storage, &catalog, &answers).await
        }
        Command::Progress { json } => cmd_progress(storage, &catalog, json),
        Command::Overview => cmd_overview(storage),
        Command::Journal { command } => match command {
            JournalCommand::New {
                title,
                mood,
                content,
            } => journal::cmd_new(storage, title, mood, content),
            JournalCommand::List => journal::cmd_list(storage),
        },
        Command::Newsletter { command } => match command {
            NewsletterCommand::Subscribe { email } => newsletter::cmd_subscribe(storage, &email),
            NewsletterCommand::Status => newsletter::cmd_status(storage),
            NewsletterCommand::Resources { category } => {
                newsletter::cmd_resources(category.as_deref())
            }
        },
    }
}

fn cmd_questions(catalog: &Catalog, json: bool) -> Result<(), String> {
    if json {
        let json = serde_json::to_string_pretty(catalog.questions())
            .map_err(|e| format!("failed to serialize questions: {e}"))?;
        println!("{json}");
    } else {
        print!("{}", format::format_catalog(catalog));
    }
    Ok(())
}

fn cmd_progress<S: KvStore>(
    storage: &Storage<S>,
    catalog: &Catalog,
    json: bool,
) -> Result<(), String> {
    let log = storage
        .load_check_ins()
        .map_err(|e| format!("failed to load check-ins: {e}"))?;

    let report = progress::report(catalog, &log);

    if json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| format!("failed to serialize report: {e}"))?;
        println!("{json}");
        return Ok(());
    }

    match report {
        Some(report) => print!("{}", format::format_report(&report)),
        None => println!("No check-ins yet. Run `clarity check-in` to start."),
    }
    Ok(())
}

fn cmd_overview<S: KvStore>(storage: &Storage<S>) -> Result<(), String> {
    let recovered = storage.load_check_ins_or_empty();
    if let Some(e) = &recovered.discarded {
        eprintln!("Warning: ignoring unreadable check-in log ({e})");
    }

    let overview = progress::overview(&recovered.entries, Timestamp::now());
    print!("{}", format::format_overview(&overview));
    Ok(())
}
