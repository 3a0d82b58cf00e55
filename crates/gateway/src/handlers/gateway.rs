//! The gateway endpoint: one URL serving full fetches and write actions.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lifelines_core::gateway::{fields_of, Action, GatewayResponse, Snapshot, UnknownAction};
use lifelines_core::timeline::{
    validate_event, validate_person, Event, NewEvent, NewPerson, Person,
};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::{
    error::AppError,
    state::AppState,
    storage::{cell_text, Sheet, SheetError},
};

/// Query parameters for the full fetch.
#[derive(Debug, Deserialize)]
pub struct SnapshotQuery {
    pub format: Option<String>,
}

/// A write request before its action name is checked.
#[derive(Debug, Deserialize)]
struct RawRequest {
    action: String,
    #[serde(default)]
    payload: Map<String, Value>,
}

/// Failures reported to the caller as error envelopes.
#[derive(Debug, Error)]
enum ActionError {
    #[error("Invalid request body: {0}")]
    InvalidBody(String),
    #[error(transparent)]
    UnknownAction(#[from] UnknownAction),
    #[error("Invalid {noun}: {message}")]
    InvalidRecord { noun: &'static str, message: String },
    #[error("Missing id in payload")]
    MissingId,
    #[error(transparent)]
    Sheet(#[from] SheetError),
}

/// GET /?format=json - Both collections as a snapshot.
#[axum::debug_handler]
pub async fn get_snapshot(
    State(state): State<AppState>,
    Query(query): Query<SnapshotQuery>,
) -> Result<Response, AppError> {
    if query.format.as_deref() != Some("json") {
        let message = match query.format {
            Some(format) => format!("Unsupported format: {format}"),
            None => "Missing format parameter".to_string(),
        };
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(GatewayResponse::<Value>::error(message)),
        )
            .into_response());
    }

    let people: Vec<Person> = decode_records(&*state.people.read().await)?;
    let events: Vec<Event> = decode_records(&*state.events.read().await)?;

    tracing::debug!(
        people = people.len(),
        events = events.len(),
        "serving snapshot"
    );
    Ok(Json(Snapshot::new(people, events)).into_response())
}

/// POST / - Runs a write action and answers with an envelope.
///
/// The body is JSON sent as plain text. Every outcome, including a failed
/// action, is answered with `200 OK`.
#[axum::debug_handler]
pub async fn post_action(State(state): State<AppState>, body: String) -> Json<GatewayResponse> {
    match run_action(&state, &body).await {
        Ok(data) => Json(GatewayResponse::success(data)),
        Err(e) => {
            tracing::warn!(error = %e, "rejected write action");
            Json(GatewayResponse::error(e.to_string()))
        }
    }
}

async fn run_action(state: &AppState, body: &str) -> Result<Value, ActionError> {
    let request: RawRequest =
        serde_json::from_str(body).map_err(|e| ActionError::InvalidBody(e.to_string()))?;
    let action: Action = request.action.parse()?;
    let payload = request.payload;

    tracing::debug!(%action, "running write action");

    let mut sheet = state.sheet(action.kind()).write().await;
    let data = match action {
        Action::AddPerson => {
            let draft: NewPerson = decode_record(payload, "person")?;
            validate_person(&draft).map_err(|e| invalid("person", e))?;
            append(&mut sheet, &draft)?
        }
        Action::AddEvent => {
            let draft: NewEvent = decode_record(payload, "event")?;
            validate_event(&draft).map_err(|e| invalid("event", e))?;
            append(&mut sheet, &draft)?
        }
        Action::UpdatePerson => {
            let id = payload_id(&payload)?;
            let person: Person = decode_record(sheet.merged(&id, &payload)?, "person")?;
            validate_person(&NewPerson::from(person)).map_err(|e| invalid("person", e))?;
            Value::Object(sheet.update(&id, &payload)?)
        }
        Action::UpdateEvent => {
            let id = payload_id(&payload)?;
            let event: Event = decode_record(sheet.merged(&id, &payload)?, "event")?;
            validate_event(&NewEvent::from(event)).map_err(|e| invalid("event", e))?;
            Value::Object(sheet.update(&id, &payload)?)
        }
        Action::DeletePerson | Action::DeleteEvent => {
            let id = payload_id(&payload)?;
            sheet.delete(&id)?;
            json!({ "id": id })
        }
    };

    tracing::info!(%action, "write action applied");
    Ok(data)
}

fn decode_records<T: DeserializeOwned>(sheet: &Sheet) -> Result<Vec<T>, AppError> {
    let rows = sheet.records().into_iter().map(Value::Object).collect();
    Ok(serde_json::from_value(Value::Array(rows))?)
}

fn decode_record<T: DeserializeOwned>(
    payload: Map<String, Value>,
    noun: &'static str,
) -> Result<T, ActionError> {
    serde_json::from_value(Value::Object(payload)).map_err(|e| invalid(noun, e))
}

fn invalid(noun: &'static str, error: impl std::fmt::Display) -> ActionError {
    ActionError::InvalidRecord {
        noun,
        message: error.to_string(),
    }
}

fn append<T: serde::Serialize>(sheet: &mut Sheet, draft: &T) -> Result<Value, ActionError> {
    let fields = fields_of(draft).map_err(|e| ActionError::InvalidBody(e.to_string()))?;
    Ok(Value::Object(sheet.append(&fields)?))
}

fn payload_id(payload: &Map<String, Value>) -> Result<String, ActionError> {
    payload
        .get("id")
        .map(cell_text)
        .filter(|id| !id.trim().is_empty())
        .ok_or(ActionError::MissingId)
}
