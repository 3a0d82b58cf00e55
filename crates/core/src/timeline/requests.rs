//! Draft records sent to the gateway when adding people and events.
//!
//! A draft is a record without an identifier; the store assigns one on
//! append. Following the Functional Core pattern these are plain data types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::serde::{
    deserialize_calendar_date, deserialize_id, deserialize_optional_calendar_date,
    deserialize_optional_string,
};

use super::types::{Category, Event, Person};

/// A person to be added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPerson {
    pub name: String,
    #[serde(deserialize_with = "deserialize_calendar_date")]
    pub birth_date: NaiveDate,
    pub color: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_string"
    )]
    pub avatar: Option<String>,
}

impl NewPerson {
    pub fn new(name: impl Into<String>, birth_date: NaiveDate, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            birth_date,
            color: color.into(),
            avatar: None,
        }
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    /// Attach an identifier, producing a full record.
    pub fn into_person(self, id: impl Into<String>) -> Person {
        Person {
            id: id.into(),
            name: self.name,
            birth_date: self.birth_date,
            color: self.color,
            avatar: self.avatar,
        }
    }
}

/// An event to be added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    #[serde(deserialize_with = "deserialize_id")]
    pub person_id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub category: Category,
    #[serde(deserialize_with = "deserialize_calendar_date")]
    pub start_date: NaiveDate,
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

impl NewEvent {
    pub fn new(
        person_id: impl Into<String>,
        title: impl Into<String>,
        category: Category,
        start_date: NaiveDate,
    ) -> Self {
        Self {
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

    /// Attach an identifier, producing a full record.
    pub fn into_event(self, id: impl Into<String>) -> Event {
        Event {
            id: id.into(),
            person_id: self.person_id,
            title: self.title,
            category: self.category,
            start_date: self.start_date,
            end_date: self.end_date,
            notes: self.notes,
        }
    }
}

impl From<Person> for NewPerson {
    /// Drops the identifier, e.g. to validate a stored record.
    fn from(person: Person) -> Self {
        Self {
            name: person.name,
            birth_date: person.birth_date,
            color: person.color,
            avatar: person.avatar,
        }
    }
}

impl From<Event> for NewEvent {
    fn from(event: Event) -> Self {
        Self {
            person_id: event.person_id,
            title: event.title,
            category: event.category,
            start_date: event.start_date,
            end_date: event.end_date,
            notes: event.notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_person_payload_has_no_id() {
        let draft = NewPerson::new("Ada", date(1990, 1, 1), "bg-blue-100");
        let value = serde_json::to_value(&draft).unwrap();

        assert_eq!(
            value,
            json!({ "name": "Ada", "birthDate": "1990-01-01", "color": "bg-blue-100" })
        );
    }

    #[test]
    fn test_new_person_into_person() {
        let person = NewPerson::new("Ada", date(1990, 1, 1), "bg-blue-100")
            .with_avatar("ada.png")
            .into_person("tmp-1");

        assert_eq!(person.id, "tmp-1");
        assert_eq!(person.avatar.as_deref(), Some("ada.png"));
    }

    #[test]
    fn test_new_event_into_event() {
        let event = NewEvent::new("2", "Moved to Lisbon", Category::Home, date(2012, 3, 1))
            .with_end_date(date(2015, 9, 30))
            .with_notes("Rua Augusta")
            .into_event("e42");

        assert_eq!(event.id, "e42");
        assert_eq!(event.person_id, "2");
        assert_eq!(event.end_date, Some(date(2015, 9, 30)));
        assert_eq!(event.notes.as_deref(), Some("Rua Augusta"));
    }

    #[test]
    fn test_new_event_payload_uses_type_key() {
        let draft = NewEvent::new("2", "Graduated", Category::Education, date(2010, 6, 1));
        let value = serde_json::to_value(&draft).unwrap();

        assert_eq!(value["type"], "Education");
        assert_eq!(value["personId"], "2");
        assert!(value.get("id").is_none());
    }

    #[test]
    fn test_record_back_to_draft() {
        let draft = NewEvent::new("2", "Graduated", Category::Education, date(2010, 6, 1))
            .with_end_date(date(2010, 6, 2));

        assert_eq!(NewEvent::from(draft.clone().into_event("e7")), draft);

        let person = NewPerson::new("Ada", date(1990, 1, 1), "bg-blue-100");
        assert_eq!(NewPerson::from(person.clone().into_person("1")), person);
    }
}
