use thiserror::Error;

/// Errors that can occur when validating a person.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PersonError {
    #[error("Person name cannot be empty")]
    EmptyName,
    #[error("Person name too long (max 100 characters)")]
    NameTooLong,
    #[error("Person color cannot be empty")]
    EmptyColor,
}

/// Errors that can occur when validating an event.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventError {
    #[error("Event title cannot be empty")]
    EmptyTitle,
    #[error("Event title too long (max 200 characters)")]
    TitleTooLong,
    #[error("Person ID is required")]
    MissingPersonId,
    #[error("End date must be after or equal to start date")]
    InvalidDateRange,
}
