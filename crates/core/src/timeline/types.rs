use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::serde::{
    deserialize_calendar_date, deserialize_id, deserialize_optional_calendar_date,
    deserialize_optional_string,
};

use super::requests::{NewEvent, NewPerson};

/// The two record collections kept by the store, the cache and the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    People,
    Events,
}

impl CollectionKind {
    /// Collection name as used in payloads and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionKind::People => "people",
            CollectionKind::Events => "events",
        }
    }

    /// Singular noun for a record of this collection.
    pub fn record_noun(&self) -> &'static str {
        match self {
            CollectionKind::People => "person",
            CollectionKind::Events => "event",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Life event category. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Home,
    Work,
    Health,
    Education,
    Travel,
    Other,
    Alive,
    Married,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 8] = [
        Category::Home,
        Category::Work,
        Category::Health,
        Category::Education,
        Category::Travel,
        Category::Other,
        Category::Alive,
        Category::Married,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Home => "Home",
            Category::Work => "Work",
            Category::Health => "Health",
            Category::Education => "Education",
            Category::Travel => "Travel",
            Category::Other => "Other",
            Category::Alive => "Alive",
            Category::Married => "Married",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a [`Category`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Case-insensitive lookup by name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// A family member shown on the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "deserialize_calendar_date")]
    pub birth_date: NaiveDate,
    /// Opaque display tag (e.g. `bg-blue-100`).
    pub color: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_string"
    )]
    pub avatar: Option<String>,
}

impl Person {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        birth_date: NaiveDate,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            birth_date,
            color: color.into(),
            avatar: None,
        }
    }

    /// Sets the avatar reference for this person.
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }
}

/// A life event owned by a [`Person`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Owning person. Referential integrity is by convention only.
    #[serde(deserialize_with = "deserialize_id")]
    pub person_id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub category: Category,
    #[serde(deserialize_with = "deserialize_calendar_date")]
    pub start_date: NaiveDate,
    /// `None` means the event is ongoing.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_calendar_date"
    )]
    pub end_date: Option<NaiveDate>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_string"
    )]
    pub notes: Option<String>,
}

impl Event {
    pub fn new(
        id: impl Into<String>,
        person_id: impl Into<String>,
        title: impl Into<String>,
        category: Category,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            person_id: person_id.into(),
            title: title.into(),
            category,
            start_date,
            end_date: None,
            notes: None,
        }
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Returns true if the event has no end date.
    pub fn is_ongoing(&self) -> bool {
        self.end_date.is_none()
    }
}

/// A record type kept in one of the two collections.
///
/// Lets the cache and the optimistic write path treat people and events
/// through a single generic code path.
pub trait TimelineRecord:
    Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// The record without an identifier, as sent to the gateway.
    type Draft: Clone + fmt::Debug + Serialize + Send + Sync + 'static;

    const KIND: CollectionKind;

    fn id(&self) -> &str;

    /// Builds a record from a draft and an identifier.
    fn from_draft(id: String, draft: Self::Draft) -> Self;
}

impl TimelineRecord for Person {
    type Draft = NewPerson;

    const KIND: CollectionKind = CollectionKind::People;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: NewPerson) -> Self {
        draft.into_person(id)
    }
}

impl TimelineRecord for Event {
    type Draft = NewEvent;

    const KIND: CollectionKind = CollectionKind::Events;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: NewEvent) -> Self {
        draft.into_event(id)
    }
}
