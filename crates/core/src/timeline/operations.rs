use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use super::error::{EventError, PersonError};
use super::requests::{NewEvent, NewPerson};
use super::types::{Category, Event, Person, UnknownCategory};

/// Category filter for the timeline view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Keep every category.
    #[default]
    All,
    /// Keep only events of this category.
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => *wanted == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("All Events"),
            CategoryFilter::Only(category) => write!(f, "{category}"),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") || trimmed.eq_ignore_ascii_case("all events") {
            return Ok(CategoryFilter::All);
        }
        trimmed.parse().map(CategoryFilter::Only)
    }
}

/// Inputs of the filtered timeline projection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventQuery {
    pub person_id: Option<String>,
    pub category: CategoryFilter,
    /// Free-text search; empty means no search.
    pub search: String,
}

impl EventQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_person(mut self, person_id: impl Into<String>) -> Self {
        self.person_id = Some(person_id.into());
        self
    }

    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }
}

/// Indexes people by identifier.
pub fn people_by_id(people: &[Person]) -> HashMap<&str, &Person> {
    people.iter().map(|p| (p.id.as_str(), p)).collect()
}

/// Derives the filtered, date-sorted list of events to display.
///
/// The person filter keeps events owned by that person, the category filter
/// keeps matching categories and a non-empty search term must appear
/// (case-insensitively) in the owner's name, the notes or the title. Results
/// are sorted ascending by start date; ties keep their input order.
pub fn filter_events<'a>(
    people: &[Person],
    events: &'a [Event],
    query: &EventQuery,
) -> Vec<&'a Event> {
    let names = people_by_id(people);
    let term = query.search.to_lowercase();

    let mut filtered: Vec<&Event> = events
        .iter()
        .filter(|event| {
            query
                .person_id
                .as_deref()
                .is_none_or(|id| event.person_id == id)
        })
        .filter(|event| query.category.matches(event.category))
        .filter(|event| {
            if term.is_empty() {
                return true;
            }
            let person_name = names
                .get(event.person_id.as_str())
                .map(|p| p.name.to_lowercase())
                .unwrap_or_default();
            let notes = event.notes.as_deref().unwrap_or_default().to_lowercase();

            person_name.contains(&term)
                || notes.contains(&term)
                || event.title.to_lowercase().contains(&term)
        })
        .collect();

    filtered.sort_by_key(|event| event.start_date);
    filtered
}

/// Validates a person draft before it is stored.
pub fn validate_person(person: &NewPerson) -> Result<(), PersonError> {
    if person.name.trim().is_empty() {
        return Err(PersonError::EmptyName);
    }
    if person.name.chars().count() > 100 {
        return Err(PersonError::NameTooLong);
    }
    if person.color.trim().is_empty() {
        return Err(PersonError::EmptyColor);
    }
    Ok(())
}

/// Validates an event draft before it is stored.
pub fn validate_event(event: &NewEvent) -> Result<(), EventError> {
    if event.title.trim().is_empty() {
        return Err(EventError::EmptyTitle);
    }
    if event.title.chars().count() > 200 {
        return Err(EventError::TitleTooLong);
    }
    if event.person_id.trim().is_empty() {
        return Err(EventError::MissingPersonId);
    }
    if event.end_date.is_some_and(|end| end < event.start_date) {
        return Err(EventError::InvalidDateRange);
    }
    Ok(())
}
