//! Customer API handlers

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use super::{read_file_field, AppState};
use crate::error::{AppError, Result};
use crate::models::{Customer, CustomerUpdate, NewCustomer};
use crate::repository::CustomerRepository;
use crate::service::{CustomerCsvSummary, ImportService};
use crate::validation::InputValidator;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/customers", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/bulk", post(bulk_create))
        .route("/upload-csv", post(upload_csv))
        .route("/{id}", get(get_by_id).put(update).delete(delete_by_id))
}

/// GET /api/customers - list all customers
async fn list(State(state): State<AppState>) -> Result<Json<Vec<Customer>>> {
    let repo = CustomerRepository::new(&state.db);
    Ok(Json(repo.list()?))
}

/// GET /api/customers/:id - fetch one customer
async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Customer>> {
    let repo = CustomerRepository::new(&state.db);
    let customer = repo
        .get(id)?
        .ok_or_else(|| AppError::NotFound(format!("customer {id}")))?;
    Ok(Json(customer))
}

/// POST /api/customers - create a customer
async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewCustomer>,
) -> Result<(StatusCode, Json<Customer>)> {
    InputValidator::validate_customer_name(&payload.full_name)?;
    if let Some(phone) = &payload.phone {
        InputValidator::validate_phone(phone)?;
    }

    let repo = CustomerRepository::new(&state.db);
    Ok((StatusCode::CREATED, Json(repo.create(&payload)?)))
}

/// POST /api/customers/bulk - create a batch of customers
async fn bulk_create(
    State(state): State<AppState>,
    Json(payload): Json<Vec<NewCustomer>>,
) -> Result<(StatusCode, Json<serde_json::Value>)> {
    for customer in &payload {
        InputValidator::validate_customer_name(&customer.full_name)?;
    }

    let repo = CustomerRepository::new(&state.db);
    let created = repo.bulk_create(&payload)?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "created": created })),
    ))
}

/// POST /api/customers/upload-csv - bulk import from an uploaded CSV
async fn upload_csv(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<CustomerCsvSummary>)> {
    let data = read_file_field(&mut multipart).await?;
    let summary = ImportService::new(&state.db).import_customers_csv(&data)?;
    Ok((StatusCode::CREATED, Json(summary)))
}

/// PUT /api/customers/:id - update a customer
async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<CustomerUpdate>,
) -> Result<Json<Customer>> {
    if let Some(name) = &payload.full_name {
        InputValidator::validate_customer_name(name)?;
    }

    let repo = CustomerRepository::new(&state.db);
    Ok(Json(repo.update(id, payload)?))
}

/// DELETE /api/customers/:id - delete a customer
async fn delete_by_id(State(state): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode> {
    let repo = CustomerRepository::new(&state.db);
    if repo.delete(id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("customer {id}")))
    }
}
