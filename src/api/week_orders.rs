//! Weekly batch API handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use super::AppState;
use crate::error::{AppError, Result};
use crate::models::{NewWeekOrder, WeekOrder};
use crate::repository::WeekOrderRepository;
use crate::validation::InputValidator;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/weekorders", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/bulk", post(bulk_create))
        .route("/{id}", get(get_by_id).put(update).delete(delete_by_id))
}

/// GET /api/weekorders - list all weekly batches
async fn list(State(state): State<AppState>) -> Result<Json<Vec<WeekOrder>>> {
    let repo = WeekOrderRepository::new(&state.db);
    Ok(Json(repo.list()?))
}

/// GET /api/weekorders/:id - fetch one weekly batch
async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<WeekOrder>> {
    let repo = WeekOrderRepository::new(&state.db);
    let week = repo
        .get(id)?
        .ok_or_else(|| AppError::NotFound(format!("week order {id}")))?;
    Ok(Json(week))
}

/// POST /api/weekorders - create a weekly batch
async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewWeekOrder>,
) -> Result<(StatusCode, Json<WeekOrder>)> {
    InputValidator::validate_week_key(&payload.week_key)?;

    let repo = WeekOrderRepository::new(&state.db);
    Ok((StatusCode::CREATED, Json(repo.create(&payload)?)))
}

/// POST /api/weekorders/bulk - create a batch of weekly batches
async fn bulk_create(
    State(state): State<AppState>,
    Json(payload): Json<Vec<NewWeekOrder>>,
) -> Result<(StatusCode, Json<serde_json::Value>)> {
    for week in &payload {
        InputValidator::validate_week_key(&week.week_key)?;
    }

    let repo = WeekOrderRepository::new(&state.db);
    let created = repo.bulk_create(&payload)?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "created": created })),
    ))
}

/// PUT /api/weekorders/:id - re-key a weekly batch
async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<NewWeekOrder>,
) -> Result<Json<WeekOrder>> {
    InputValidator::validate_week_key(&payload.week_key)?;

    let repo = WeekOrderRepository::new(&state.db);
    Ok(Json(repo.update_key(id, &payload.week_key)?))
}

/// DELETE /api/weekorders/:id - delete a weekly batch
async fn delete_by_id(State(state): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode> {
    let repo = WeekOrderRepository::new(&state.db);
    if repo.delete(id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("week order {id}")))
    }
}
