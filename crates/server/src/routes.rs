//! Route handlers
//!
//! Handlers only translate HTTP into [`Command`]s and [`Envelope`]s back into
//! HTTP. Commands run on the blocking pool since a strict store fsyncs while
//! holding its lock.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rolodex_executor::{Command, Envelope, Error};
use serde_json::{Map, Value};

use crate::AppState;

// =============================================================================
// Helpers
// =============================================================================

fn respond(status: u16, body: Envelope) -> Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(body)).into_response()
}

fn error_response(error: &Error) -> Response {
    let (status, body) = Envelope::from_error(error);
    respond(status, body)
}

async fn dispatch(state: AppState, cmd: Command) -> Response {
    let executor = state.executor.clone();
    let outcome = tokio::task::spawn_blocking(move || executor.execute(cmd)).await;

    let result = match outcome {
        Ok(result) => result,
        Err(join) => Err(Error::Internal {
            reason: format!("command task failed: {}", join),
        }),
    };

    match result {
        Ok(output) => {
            let (status, body) = Envelope::from_output(output);
            respond(status, body)
        }
        Err(e) => error_response(&e),
    }
}

/// Decode a request body
///
/// An empty body counts as `{}`; the content type is not checked.
fn parse_body(body: &Bytes) -> Result<Value, Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(body).map_err(|e| Error::InvalidInput {
        reason: format!("malformed JSON body: {}", e),
    })
}

// =============================================================================
// Contacts
// =============================================================================

pub(crate) async fn list_contacts(State(state): State<AppState>) -> Response {
    dispatch(state, Command::List).await
}

pub(crate) async fn get_contact(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    dispatch(state, Command::Get { id }).await
}

pub(crate) async fn create_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Response {
    let payload = match parse_body(&body) {
        Ok(payload) => payload,
        Err(e) => return error_response(&e),
    };
    tracing::debug!(id = %id, payload = %payload, "create request");
    dispatch(state, Command::Create { id, payload }).await
}

pub(crate) async fn update_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Response {
    let payload = match parse_body(&body) {
        Ok(payload) => payload,
        Err(e) => return error_response(&e),
    };
    tracing::debug!(id = %id, payload = %payload, "update request");
    dispatch(state, Command::Update { id, payload }).await
}

pub(crate) async fn delete_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    dispatch(state, Command::Delete { id }).await
}

// =============================================================================
// Health and demo
// =============================================================================

pub(crate) async fn healthz(State(state): State<AppState>) -> Response {
    dispatch(state, Command::Ping).await
}

pub(crate) async fn demo_add() -> (StatusCode, &'static str) {
    (StatusCode::CREATED, "Thanks for adding something")
}

pub(crate) async fn demo_update(Path(_id): Path<String>) -> (StatusCode, &'static str) {
    (StatusCode::OK, "Thanks for updating something")
}
