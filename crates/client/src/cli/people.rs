//! People CLI commands.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use lifelines_core::timeline::{validate_person, NewPerson};

use crate::error::{ClientError, Result};

/// People management commands.
#[derive(Debug, Parser)]
pub struct PeopleCommand {
    #[command(subcommand)]
    pub action: PeopleAction,
}

/// Available people actions.
#[derive(Debug, Subcommand)]
pub enum PeopleAction {
    /// List everyone on the timeline.
    List,
    /// Add a person.
    Add {
        /// Display name.
        #[arg(long)]
        name: String,
        /// Birth date (YYYY-MM-DD).
        #[arg(long)]
        birth_date: NaiveDate,
        /// Display color tag (e.g. bg-blue-100).
        #[arg(long)]
        color: String,
        /// Avatar reference.
        #[arg(long)]
        avatar: Option<String>,
    },
}

/// Builds and validates a draft from `people add` arguments.
pub fn person_draft(
    name: String,
    birth_date: NaiveDate,
    color: String,
    avatar: Option<String>,
) -> Result<NewPerson> {
    let mut draft = NewPerson::new(name.trim(), birth_date, color.trim());
    if let Some(avatar) = avatar.filter(|a| !a.trim().is_empty()) {
        draft = draft.with_avatar(avatar);
    }
    validate_person(&draft).map_err(|e| ClientError::InvalidInput(e.to_string()))?;
    Ok(draft)
}
