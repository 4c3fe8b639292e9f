use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::IntoResponse,
};
use engine::EngineError;

use serde::Serialize;
pub use server::{REMOTE_USER_HEADER, app, run_with_listener};

mod authorized_users;
mod expenses;
mod server;

pub mod types {
    pub mod expense {
        pub use api_types::expense::{Expense, ExpenseWrite, PaidBy, SplitType};
    }

    pub mod authorized_user {
        pub use api_types::authorized_user::{AuthorizedUser, AuthorizedUserWrite};
    }
}

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
    /// A request axum could not extract (bad JSON, bad path segment).
    Rejected(StatusCode, String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::IdMismatch(_) => StatusCode::BAD_REQUEST,
        EngineError::Conflict(_) => StatusCode::CONFLICT,
        EngineError::InvalidField(_) => StatusCode::UNPROCESSABLE_ENTITY,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            // Store failures are logged, never echoed to the client.
            ServerError::Engine(EngineError::Database(db_err)) => {
                tracing::error!("database error: {db_err}");
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
            ServerError::Engine(err) => (status_for_engine_error(&err), err.to_string()),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
            ServerError::Rejected(status, err) => (status, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Rejected(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for ServerError {
    fn from(rejection: PathRejection) -> Self {
        Self::Rejected(rejection.status(), rejection.body_text())
    }
}

/// A write rejected as concurrent is a 404 if the row is gone by now, a 409 otherwise.
fn resolve_conflict(
    conflict: EngineError,
    still_exists: bool,
    label: &str,
    id: i32,
) -> ServerError {
    if still_exists {
        tracing::warn!("{label} {id}: {conflict}");
        ServerError::Engine(conflict)
    } else {
        ServerError::Engine(EngineError::KeyNotFound(format!("{label} {id}")))
    }
}
