//! Newsletter commands: subscribe, status, resources.

use clap::Subcommand;

use crate::model;
use crate::storage::Storage;
use crate::store::KvStore;

use super::format::{format_resource, format_subscription};

#[derive(Debug, Subcommand)]
pub enum NewsletterCommand {
    /// Subscribe with an email address.
    Subscribe {
        /// Where to send the newsletter.
        email: String,
    },

    /// Show whether you're subscribed.
    Status,

    /// List the curated reading suggestions.
    Resources {
        /// Only show one category (e.g. "Psychology").
        #[arg(long)]
        category: Option<String>,
    },
}

pub(super) fn cmd_subscribe<S: KvStore>(storage: &Storage<S>, email: &str) -> Result<(), String> {
    let subscription = storage
        .subscribe(email)
        .map_err(|e| format!("failed to subscribe: {e}"))?;

    eprintln!("{}", format_subscription(&subscription));
    Ok(())
}

pub(super) fn cmd_status<S: KvStore>(storage: &Storage<S>) -> Result<(), String> {
    let subscription = storage
        .subscription()
        .map_err(|e| format!("failed to read subscription: {e}"))?;

    println!("{}", format_subscription(&subscription));
    Ok(())
}

pub(super) fn cmd_resources(category: Option<&str>) -> Result<(), String> {
    let list = model::resources(category);
    if list.is_empty() {
        return Err(format!(
            "no resources in category '{}'",
            category.unwrap_or_default()
        ));
    }
    for resource in list {
        println!("{}", format_resource(resource));
    }
    Ok(())
}
