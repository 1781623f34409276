//! Basta - Grocery Back-Office
//!
//! A back-office service for a neighborhood grocery and delivery operation:
//! customers, inventory items, weekly order batches, orders, and order line
//! items behind a REST API, plus two bulk-import pipelines.
//!
//! # Features
//!
//! - CRUD + bulk-create endpoints for every entity
//! - Weekly order-sheet (XLSX) import with customer/item reconciliation
//! - Customer CSV import
//! - Plain HTML pages for manual customer upkeep

/// HTTP routers and handlers
pub mod api;
/// Configuration management
pub mod config;
/// Database pool and migrations
pub mod db;
/// Error types and HTTP mapping
pub mod error;
/// Logging setup and utilities
pub mod logging;
/// Metrics collection
pub mod metrics;
/// Data models and structures
pub mod models;
/// Weekly order-sheet scanner
pub mod order_sheet;
/// Repository pattern for data access
pub mod repository;
/// Database schema definitions
pub mod schema;
/// Import pipelines
pub mod service;
/// Shared helpers
pub mod utils;
/// Input validation and sanitization
pub mod validation;

// Re-export key components for easier access
pub use config::AppConfig;
pub use db::Database;
pub use error::{AppError, Result};
pub use service::{ImportService, ImportSummary};
