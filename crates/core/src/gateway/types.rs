//! Wire types shared by the gateway server and the gateway client.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::timeline::{CollectionKind, Event, Person, TimelineRecord};

use super::error::{GatewayError, Result};

/// Response body of a full fetch: both collections at once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub people: Vec<Person>,
    pub events: Vec<Event>,
}

impl Snapshot {
    pub fn new(people: Vec<Person>, events: Vec<Event>) -> Self {
        Self { people, events }
    }
}

/// Write actions understood by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    AddPerson,
    AddEvent,
    UpdatePerson,
    UpdateEvent,
    DeletePerson,
    DeleteEvent,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::AddPerson,
        Action::AddEvent,
        Action::UpdatePerson,
        Action::UpdateEvent,
        Action::DeletePerson,
        Action::DeleteEvent,
    ];

    /// The add action for a collection.
    pub fn add(kind: CollectionKind) -> Self {
        match kind {
            CollectionKind::People => Action::AddPerson,
            CollectionKind::Events => Action::AddEvent,
        }
    }

    /// The collection this action writes to.
    pub fn kind(&self) -> CollectionKind {
        match self {
            Action::AddPerson | Action::UpdatePerson | Action::DeletePerson => {
                CollectionKind::People
            }
            Action::AddEvent | Action::UpdateEvent | Action::DeleteEvent => CollectionKind::Events,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::AddPerson => "addPerson",
            Action::AddEvent => "addEvent",
            Action::UpdatePerson => "updatePerson",
            Action::UpdateEvent => "updateEvent",
            Action::DeletePerson => "deletePerson",
            Action::DeleteEvent => "deleteEvent",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when an action name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown action: {0}")]
pub struct UnknownAction(pub String);

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}

/// Body of a write request: `{action, payload}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayRequest {
    pub action: Action,
    #[serde(default)]
    pub payload: Map<String, Value>,
}

impl GatewayRequest {
    pub fn new(action: Action, payload: Map<String, Value>) -> Self {
        Self { action, payload }
    }

    /// Add request for a draft record. The payload carries no identifier.
    pub fn add<R: TimelineRecord>(draft: &R::Draft) -> Result<Self> {
        Ok(Self::new(Action::add(R::KIND), fields_of(draft)?))
    }
}

/// Serializes a value into a field map.
pub fn fields_of<T: Serialize>(value: &T) -> Result<Map<String, Value>> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(GatewayError::InvalidPayload(format!(
            "expected an object, got {other}"
        ))),
        Err(e) => Err(GatewayError::InvalidPayload(e.to_string())),
    }
}

/// Outcome flag of a write response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Write response envelope: `{status: "success", data}` or
/// `{status: "error", message}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayResponse<T = Value> {
    pub status: ResponseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> GatewayResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            data: Some(data),
            message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            data: None,
            message: Some(message.into()),
        }
    }

    /// Converts the envelope into a result.
    ///
    /// An error envelope becomes [`GatewayError::Rejected`] carrying the
    /// server message (empty when the server sent none).
    pub fn into_result(self) -> Result<Option<T>> {
        match self.status {
            ResponseStatus::Success => Ok(self.data),
            ResponseStatus::Error => Err(GatewayError::Rejected(self.message.unwrap_or_default())),
        }
    }
}
