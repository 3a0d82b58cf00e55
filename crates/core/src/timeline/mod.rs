mod dates;
mod error;
mod mock_data;
mod operations;
mod requests;
mod types;

pub use dates::{
    calculate_age, calculate_duration, calendar_months_between, end_label, format_date,
    since_label, whole_months_between, whole_years_between, years_and_months,
};
pub use error::{EventError, PersonError};
pub use mock_data::{demo_events, demo_people};
pub use operations::{
    filter_events, people_by_id, validate_event, validate_person, CategoryFilter, EventQuery,
};
pub use requests::{NewEvent, NewPerson};
pub use types::{Category, CollectionKind, Event, Person, TimelineRecord, UnknownCategory};
