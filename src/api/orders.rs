//! Order API handlers, including the weekly order-sheet upload

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use super::{read_file_field, AppState};
use crate::error::{AppError, Result};
use crate::models::{NewOrder, Order, OrderUpdate};
use crate::repository::OrderRepository;
use crate::service::{ImportService, ImportSummary};
use crate::validation::InputValidator;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/bulk", post(bulk_create))
        .route("/upload-sheet", post(upload_sheet))
        .route("/{id}", get(get_by_id).put(update).delete(delete_by_id))
}

fn validate_new_order(order: &NewOrder) -> Result<()> {
    InputValidator::validate_price("fee_price", order.fee_price)?;
    InputValidator::validate_price("total_amount", order.total_amount)?;
    Ok(())
}

/// GET /api/orders - list all orders
async fn list(State(state): State<AppState>) -> Result<Json<Vec<Order>>> {
    let repo = OrderRepository::new(&state.db);
    Ok(Json(repo.list()?))
}

/// GET /api/orders/:id - fetch one order
async fn get_by_id(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Order>> {
    let repo = OrderRepository::new(&state.db);
    let order = repo
        .get(id)?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;
    Ok(Json(order))
}

/// POST /api/orders - create an order
async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewOrder>,
) -> Result<(StatusCode, Json<Order>)> {
    validate_new_order(&payload)?;

    let repo = OrderRepository::new(&state.db);
    Ok((StatusCode::CREATED, Json(repo.create(&payload)?)))
}

/// POST /api/orders/bulk - create a batch of orders
async fn bulk_create(
    State(state): State<AppState>,
    Json(payload): Json<Vec<NewOrder>>,
) -> Result<(StatusCode, Json<serde_json::Value>)> {
    for order in &payload {
        validate_new_order(order)?;
    }

    let repo = OrderRepository::new(&state.db);
    let created = repo.bulk_create(&payload)?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "created": created })),
    ))
}

/// POST /api/orders/upload-sheet - import a weekly order-sheet workbook
async fn upload_sheet(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ImportSummary>)> {
    let data = read_file_field(&mut multipart).await?;
    let summary = ImportService::new(&state.db).import_order_sheet(&data)?;
    Ok((StatusCode::CREATED, Json(summary)))
}

/// PUT /api/orders/:id - update an order
async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderUpdate>,
) -> Result<Json<Order>> {
    if let Some(fee) = payload.fee_price {
        InputValidator::validate_price("fee_price", fee)?;
    }
    if let Some(total) = payload.total_amount {
        InputValidator::validate_price("total_amount", total)?;
    }

    let repo = OrderRepository::new(&state.db);
    Ok(Json(repo.update(id, payload)?))
}

/// DELETE /api/orders/:id - delete an order
async fn delete_by_id(State(state): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode> {
    let repo = OrderRepository::new(&state.db);
    if repo.delete(id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("order {id}")))
    }
}
