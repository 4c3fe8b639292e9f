//! Expenses API endpoints.
//!
//! Audit fields are owned by the server: `created_at`/`created_by` are stamped
//! on create and never rewritten, `updated_at` is stamped on every update.

use api_types::expense::{Expense, ExpenseWrite, PaidBy, SplitType};
use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderName, StatusCode, header},
};
use axum_extra::{TypedHeader, extract::WithRejection};
use chrono::{DateTime, Utc};
use engine::EngineError;

use crate::{
    ServerError, resolve_conflict,
    server::{RemoteUser, ServerState},
};

const LABEL: &str = "expense";

fn map_paid_by(paid_by: engine::PaidBy) -> PaidBy {
    match paid_by {
        engine::PaidBy::You => PaidBy::You,
        engine::PaidBy::Partner => PaidBy::Partner,
    }
}

fn map_split_type(split_type: engine::SplitType) -> SplitType {
    match split_type {
        engine::SplitType::Equal => SplitType::Equal,
        engine::SplitType::Custom => SplitType::Custom,
        engine::SplitType::YouPay => SplitType::YouPay,
        engine::SplitType::PartnerPays => SplitType::PartnerPays,
    }
}

fn parse_paid_by(paid_by: PaidBy) -> engine::PaidBy {
    match paid_by {
        PaidBy::You => engine::PaidBy::You,
        PaidBy::Partner => engine::PaidBy::Partner,
    }
}

fn parse_split_type(split_type: SplitType) -> engine::SplitType {
    match split_type {
        SplitType::Equal => engine::SplitType::Equal,
        SplitType::Custom => engine::SplitType::Custom,
        SplitType::YouPay => engine::SplitType::YouPay,
        SplitType::PartnerPays => engine::SplitType::PartnerPays,
    }
}

fn map_expense(expense: engine::Expense) -> Expense {
    Expense {
        id: expense.id,
        description: expense.description,
        date: expense.date,
        amount: expense.amount,
        paid_by: map_paid_by(expense.paid_by),
        split_type: map_split_type(expense.split_type),
        your_percentage: expense.your_percentage,
        currency: expense.currency,
        category: expense.category,
        notes: expense.notes,
        created_at: expense.created_at,
        updated_at: expense.updated_at,
        created_by: expense.created_by,
    }
}

/// Engine record for a request body. Audit fields are carried over as sent
/// and overwritten or dropped by the caller.
fn expense_from_payload(payload: ExpenseWrite, now: DateTime<Utc>) -> engine::Expense {
    engine::Expense {
        id: payload.id,
        description: payload.description,
        date: payload.date.unwrap_or(now),
        amount: payload.amount,
        paid_by: parse_paid_by(payload.paid_by),
        split_type: parse_split_type(payload.split_type),
        your_percentage: payload.your_percentage,
        currency: payload.currency,
        category: payload.category,
        notes: payload.notes,
        created_at: payload.created_at.unwrap_or(now),
        updated_at: None,
        created_by: payload.created_by.unwrap_or_default(),
    }
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Expense>>, ServerError> {
    let expenses = state
        .engine
        .list_expenses()
        .await?
        .into_iter()
        .map(map_expense)
        .collect();

    Ok(Json(expenses))
}

pub async fn get(
    State(state): State<ServerState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ServerError>,
) -> Result<Json<Expense>, ServerError> {
    let expense = state
        .engine
        .expense(id)
        .await?
        .ok_or_else(|| EngineError::KeyNotFound(format!("{LABEL} {id}")))?;

    Ok(Json(map_expense(expense)))
}

pub async fn create(
    remote_user: Option<TypedHeader<RemoteUser>>,
    State(state): State<ServerState>,
    WithRejection(Json(payload), _): WithRejection<Json<ExpenseWrite>, ServerError>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<Expense>), ServerError> {
    let now = Utc::now();
    let mut expense = expense_from_payload(payload, now);
    expense.id = 0;
    expense.created_at = now;
    let identity = remote_user.as_ref().map(|user| user.display_name());
    expense.created_by = engine::creator_name(identity);

    let created = state.engine.insert_expense(expense).await?;
    tracing::info!(
        expense_id = created.id,
        created_by = %created.created_by,
        "expense created"
    );

    let location = format!("/api/expenses/{}", created.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(map_expense(created)),
    ))
}

pub async fn update(
    State(state): State<ServerState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ServerError>,
    WithRejection(Json(payload), _): WithRejection<Json<ExpenseWrite>, ServerError>,
) -> Result<StatusCode, ServerError> {
    if payload.id != id {
        return Err(ServerError::Generic(format!(
            "path id {id} does not match body id {}",
            payload.id
        )));
    }
    // Updates replace the whole record, date included.
    if payload.date.is_none() {
        return Err(EngineError::InvalidField("date is required".to_string()).into());
    }

    let now = Utc::now();
    let mut expense = expense_from_payload(payload, now);
    expense.updated_at = Some(now);

    match state.engine.update_expense(id, expense).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(conflict @ EngineError::Conflict(_)) => {
            let still_exists = state.engine.expense_exists(id).await?;
            Err(resolve_conflict(conflict, still_exists, LABEL, id))
        }
        Err(err) => Err(err.into()),
    }
}

pub async fn delete(
    State(state): State<ServerState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ServerError>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_expense(id).await?;
    tracing::info!(expense_id = id, "expense deleted");
    Ok(StatusCode::NO_CONTENT)
}
