//! Bundled demo dataset.
//!
//! Used to seed the client when the local cache has nothing for a
//! collection, and optionally to seed the reference gateway. Pure functions
//! with stable identifiers so tests can rely on them.

use chrono::NaiveDate;

use super::types::{Category, Event, Person};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    // Literal dates below are all valid.
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// Demo people, identifiers `1` to `6`.
pub fn demo_people() -> Vec<Person> {
    vec![
        Person::new("1", "Walter Brennan", date(1963, 4, 28), "bg-blue-100"),
        Person::new("2", "Maeve Brennan", date(1965, 10, 17), "bg-pink-100"),
        Person::new("3", "Clara Odell", date(1988, 7, 1), "bg-purple-100"),
        Person::new("4", "Tobias Brennan", date(1990, 6, 6), "bg-green-100"),
        Person::new("5", "Felix Brennan", date(1992, 1, 10), "bg-yellow-100"),
        Person::new("6", "Owen Brennan", date(1994, 1, 30), "bg-orange-100"),
    ]
}

/// Demo events, identifiers `e1` to `e11`.
pub fn demo_events() -> Vec<Event> {
    vec![
        Event::new("e1", "1", "Alive", Category::Alive, date(1963, 4, 28))
            .with_notes("Born in Halifax"),
        Event::new("e2", "2", "Alive", Category::Alive, date(1965, 10, 17))
            .with_notes("Born in Moncton"),
        Event::new("e3", "1", "Married", Category::Married, date(1986, 6, 6))
            .with_notes("Maeve Brennan"),
        Event::new("e4", "2", "Married", Category::Married, date(1986, 6, 6))
            .with_notes("Walter Brennan"),
        Event::new("e5", "3", "Alive", Category::Alive, date(1988, 7, 1)),
        Event::new("e6", "4", "Alive", Category::Alive, date(1990, 6, 6)),
        Event::new("e7", "5", "Alive", Category::Alive, date(1992, 1, 10)),
        Event::new("e8", "6", "Alive", Category::Alive, date(1994, 1, 30)),
        Event::new("e9", "1", "Home", Category::Home, date(1998, 7, 24))
            .with_notes("12 Orchard Lane, Fredericton"),
        Event::new("e10", "1", "Work", Category::Work, date(2005, 12, 1))
            .with_notes("Harbor Labs"),
        Event::new("e11", "2", "Work", Category::Work, date(2005, 12, 1))
            .with_notes("Harbor Labs"),
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_demo_counts() {
        assert_eq!(demo_people().len(), 6);
        assert_eq!(demo_events().len(), 11);
    }

    #[test]
    fn test_demo_ids_are_unique() {
        let people = demo_people();
        let ids: HashSet<&str> = people.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), people.len());

        let events = demo_events();
        let ids: HashSet<&str> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids.len(), events.len());
    }

    #[test]
    fn test_demo_events_reference_demo_people() {
        let people = demo_people();
        let person_ids: HashSet<&str> = people.iter().map(|p| p.id.as_str()).collect();

        for event in demo_events() {
            assert!(
                person_ids.contains(event.person_id.as_str()),
                "event {} references unknown person {}",
                event.id,
                event.person_id
            );
        }
    }

    #[test]
    fn test_alive_events_start_at_birth() {
        let people = demo_people();
        for event in demo_events()
            .iter()
            .filter(|e| e.category == Category::Alive)
        {
            let owner = people.iter().find(|p| p.id == event.person_id).unwrap();
            assert_eq!(event.start_date, owner.birth_date);
        }
    }
}
