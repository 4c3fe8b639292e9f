//! Authorized users API endpoints.
//!
//! Plain CRUD over the allow-list: nothing is stamped and no caller identity
//! is required.

use api_types::authorized_user::{AuthorizedUser, AuthorizedUserWrite};
use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderName, StatusCode, header},
};
use axum_extra::extract::WithRejection;
use engine::EngineError;

use crate::{ServerError, resolve_conflict, server::ServerState};

const LABEL: &str = "authorized user";

fn map_user(user: engine::AuthorizedUser) -> AuthorizedUser {
    AuthorizedUser {
        id: user.id,
        email: user.email,
        name: user.name,
        is_admin: user.is_admin,
    }
}

fn user_from_payload(payload: AuthorizedUserWrite) -> engine::AuthorizedUser {
    engine::AuthorizedUser {
        id: payload.id,
        email: payload.email,
        name: payload.name,
        is_admin: payload.is_admin,
    }
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<AuthorizedUser>>, ServerError> {
    let users = state
        .engine
        .list_authorized_users()
        .await?
        .into_iter()
        .map(map_user)
        .collect();

    Ok(Json(users))
}

pub async fn get(
    State(state): State<ServerState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ServerError>,
) -> Result<Json<AuthorizedUser>, ServerError> {
    let user = state
        .engine
        .authorized_user(id)
        .await?
        .ok_or_else(|| EngineError::KeyNotFound(format!("{LABEL} {id}")))?;

    Ok(Json(map_user(user)))
}

pub async fn create(
    State(state): State<ServerState>,
    WithRejection(Json(payload), _): WithRejection<Json<AuthorizedUserWrite>, ServerError>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<AuthorizedUser>), ServerError> {
    let mut user = user_from_payload(payload);
    user.id = 0;

    let created = state.engine.insert_authorized_user(user).await?;
    tracing::info!(authorized_user_id = created.id, "authorized user created");

    let location = format!("/api/authorizedusers/{}", created.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(map_user(created)),
    ))
}

pub async fn update(
    State(state): State<ServerState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ServerError>,
    WithRejection(Json(payload), _): WithRejection<Json<AuthorizedUserWrite>, ServerError>,
) -> Result<StatusCode, ServerError> {
    if payload.id != id {
        return Err(ServerError::Generic(format!(
            "path id {id} does not match body id {}",
            payload.id
        )));
    }

    match state
        .engine
        .update_authorized_user(id, user_from_payload(payload))
        .await
    {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(conflict @ EngineError::Conflict(_)) => {
            let still_exists = state.engine.authorized_user_exists(id).await?;
            Err(resolve_conflict(conflict, still_exists, LABEL, id))
        }
        Err(err) => Err(err.into()),
    }
}

pub async fn delete(
    State(state): State<ServerState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ServerError>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_authorized_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
