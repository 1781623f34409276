//! HTTP surface
//!
//! One router module per entity plus the plain-HTML pages. Handlers stay
//! thin: construct a repository or service, run it, map the result.

pub mod customers;
pub mod items;
pub mod order_items;
pub mod orders;
pub mod pages;
pub mod week_orders;

use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Multipart};
use axum::routing::get;
use axum::{Json, Router};
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::db::Database;
use crate::error::{AppError, Result};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub config: Arc<AppConfig>,
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    let max_upload = state.config.import.max_upload_bytes;

    Router::new()
        .merge(customers::router())
        .merge(items::router())
        .merge(week_orders::router())
        .merge(orders::router())
        .merge(order_items::router())
        .merge(pages::router())
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Pull the bytes of the multipart field named `file`.
///
/// A request without that field is a client error, matching the import
/// endpoints' contract.
pub(crate) async fn read_file_field(multipart: &mut Multipart) -> Result<Vec<u8>> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") {
            return Ok(field.bytes().await?.to_vec());
        }
    }
    Err(AppError::Validation("no file uploaded".to_string()))
}
