//! Order line item API handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use super::AppState;
use crate::error::{AppError, Result};
use crate::models::{NewOrderItem, OrderItem, OrderItemUpdate};
use crate::repository::OrderItemRepository;
use crate::validation::InputValidator;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/orderitems", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/bulk", post(bulk_create))
        .route("/{id}", get(get_by_id).put(update).delete(delete_by_id))
}

fn validate_new_order_item(line: &NewOrderItem) -> Result<()> {
    InputValidator::validate_quantity(line.quantity)?;
    InputValidator::validate_price("unit_price", line.unit_price)?;
    Ok(())
}

/// GET /api/orderitems - list all line items
async fn list(State(state): State<AppState>) -> Result<Json<Vec<OrderItem>>> {
    let repo = OrderItemRepository::new(&state.db);
    Ok(Json(repo.list()?))
}

/// GET /api/orderitems/:id - fetch one line item
async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<OrderItem>> {
    let repo = OrderItemRepository::new(&state.db);
    let line = repo
        .get(id)?
        .ok_or_else(|| AppError::NotFound(format!("order item {id}")))?;
    Ok(Json(line))
}

/// POST /api/orderitems - create a line item
async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewOrderItem>,
) -> Result<(StatusCode, Json<OrderItem>)> {
    validate_new_order_item(&payload)?;

    let repo = OrderItemRepository::new(&state.db);
    Ok((StatusCode::CREATED, Json(repo.create(&payload)?)))
}

/// POST /api/orderitems/bulk - create a batch of line items
async fn bulk_create(
    State(state): State<AppState>,
    Json(payload): Json<Vec<NewOrderItem>>,
) -> Result<(StatusCode, Json<serde_json::Value>)> {
    for line in &payload {
        validate_new_order_item(line)?;
    }

    let repo = OrderItemRepository::new(&state.db);
    let created = repo.bulk_create(&payload)?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "created": created })),
    ))
}

/// PUT /api/orderitems/:id - update a line item
async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderItemUpdate>,
) -> Result<Json<OrderItem>> {
    if let Some(quantity) = payload.quantity {
        InputValidator::validate_quantity(quantity)?;
    }
    if let Some(price) = payload.unit_price {
        InputValidator::validate_price("unit_price", price)?;
    }

    let repo = OrderItemRepository::new(&state.db);
    Ok(Json(repo.update(id, payload)?))
}

/// DELETE /api/orderitems/:id - delete a line item
async fn delete_by_id(State(state): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode> {
    let repo = OrderItemRepository::new(&state.db);
    if repo.delete(id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("order item {id}")))
    }
}
