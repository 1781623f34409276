//! Inventory item API handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use super::AppState;
use crate::error::{AppError, Result};
use crate::models::{Item, ItemUpdate, NewItem};
use crate::repository::ItemRepository;
use crate::validation::InputValidator;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/items", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/bulk", post(bulk_create))
        .route("/{id}", get(get_by_id).put(update).delete(delete_by_id))
}

fn validate_new_item(item: &NewItem) -> Result<()> {
    InputValidator::validate_item_name(&item.name)?;
    InputValidator::validate_price("cost_price", item.cost_price)?;
    InputValidator::validate_price("sale_price", item.sale_price)?;
    Ok(())
}

/// GET /api/items - list all items
async fn list(State(state): State<AppState>) -> Result<Json<Vec<Item>>> {
    let repo = ItemRepository::new(&state.db);
    Ok(Json(repo.list()?))
}

/// GET /api/items/:id - fetch one item
async fn get_by_id(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Item>> {
    let repo = ItemRepository::new(&state.db);
    let item = repo
        .get(id)?
        .ok_or_else(|| AppError::NotFound(format!("item {id}")))?;
    Ok(Json(item))
}

/// POST /api/items - create an item
async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewItem>,
) -> Result<(StatusCode, Json<Item>)> {
    validate_new_item(&payload)?;

    let repo = ItemRepository::new(&state.db);
    Ok((StatusCode::CREATED, Json(repo.create(&payload)?)))
}

/// POST /api/items/bulk - create a batch of items
async fn bulk_create(
    State(state): State<AppState>,
    Json(payload): Json<Vec<NewItem>>,
) -> Result<(StatusCode, Json<serde_json::Value>)> {
    for item in &payload {
        validate_new_item(item)?;
    }

    let repo = ItemRepository::new(&state.db);
    let created = repo.bulk_create(&payload)?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "created": created })),
    ))
}

/// PUT /api/items/:id - update an item
async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ItemUpdate>,
) -> Result<Json<Item>> {
    if let Some(name) = &payload.name {
        InputValidator::validate_item_name(name)?;
    }
    if let Some(price) = payload.cost_price {
        InputValidator::validate_price("cost_price", price)?;
    }
    if let Some(price) = payload.sale_price {
        InputValidator::validate_price("sale_price", price)?;
    }

    let repo = ItemRepository::new(&state.db);
    Ok(Json(repo.update(id, payload)?))
}

/// DELETE /api/items/:id - delete an item
async fn delete_by_id(State(state): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode> {
    let repo = ItemRepository::new(&state.db);
    if repo.delete(id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("item {id}")))
    }
}
