//! Event CLI commands.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use lifelines_core::timeline::{validate_event, Category, CategoryFilter, EventQuery, NewEvent};

use crate::error::{ClientError, Result};

/// Event management commands.
#[derive(Debug, Parser)]
pub struct EventsCommand {
    #[command(subcommand)]
    pub action: EventsAction,
}

/// Available event actions.
#[derive(Debug, Subcommand)]
pub enum EventsAction {
    /// Show the filtered timeline, sorted by start date.
    List {
        /// Only events of this person.
        #[arg(long)]
        person: Option<String>,
        /// Only events of this category ("all" for every category).
        #[arg(long, default_value = "all")]
        category: CategoryFilter,
        /// Case-insensitive match on person name, title or notes.
        #[arg(long)]
        search: Option<String>,
    },
    /// Add an event.
    Add {
        /// Owning person identifier.
        #[arg(long)]
        person: String,
        /// Event title.
        #[arg(long)]
        title: String,
        /// Category (Alive, Married, Home, Work, Education, Travel, Health, Other).
        #[arg(long)]
        category: Category,
        /// Start date (YYYY-MM-DD).
        #[arg(long)]
        start_date: NaiveDate,
        /// End date (YYYY-MM-DD); omit for ongoing events.
        #[arg(long)]
        end_date: Option<NaiveDate>,
        /// Free-form notes.
        #[arg(long)]
        notes: Option<String>,
    },
}

/// Builds the timeline query from `events list` arguments.
pub fn event_query(
    person: Option<String>,
    category: CategoryFilter,
    search: Option<String>,
) -> EventQuery {
    let mut query = EventQuery::new().with_category(category);
    if let Some(person) = person {
        query = query.with_person(person);
    }
    if let Some(search) = search {
        query = query.with_search(search);
    }
    query
}

/// Builds and validates a draft from `events add` arguments.
pub fn event_draft(
    person: String,
    title: String,
    category: Category,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    notes: Option<String>,
) -> Result<NewEvent> {
    let mut draft = NewEvent::new(person.trim(), title.trim(), category, start_date);
    if let Some(end_date) = end_date {
        draft = draft.with_end_date(end_date);
    }
    if let Some(notes) = notes.filter(|n| !n.trim().is_empty()) {
        draft = draft.with_notes(notes);
    }
    validate_event(&draft).map_err(|e| ClientError::InvalidInput(e.to_string()))?;
    Ok(draft)
}
