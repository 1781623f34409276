use std::time::Duration;

use metrics::{counter, gauge, histogram};

use crate::error::{AppError, Result};

/// Metric names used across the application
#[derive(Debug, Clone, Copy)]
pub struct MetricsCollector {
    // Database metrics
    pub db_operations_total: &'static str,
    pub db_operation_duration: &'static str,
    pub db_connection_pool_size: &'static str,

    // Import pipeline metrics
    pub orders_imported_total: &'static str,
    pub order_items_imported_total: &'static str,
    pub customers_imported_total: &'static str,
    pub import_duration: &'static str,
    pub import_rows_skipped_total: &'static str,

    // Error metrics
    pub errors_total: &'static str,
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self {
            db_operations_total: "basta_db_operations_total",
            db_operation_duration: "basta_db_operation_duration_seconds",
            db_connection_pool_size: "basta_db_connection_pool_size",

            orders_imported_total: "basta_orders_imported_total",
            order_items_imported_total: "basta_order_items_imported_total",
            customers_imported_total: "basta_customers_imported_total",
            import_duration: "basta_import_duration_seconds",
            import_rows_skipped_total: "basta_import_rows_skipped_total",

            errors_total: "basta_errors_total",
        }
    }
}

impl MetricsCollector {
    /// Install the global recorder.
    ///
    /// No exporter is wired; the noop recorder keeps the macros free until an
    /// operator plugs a real backend in.
    pub fn init() -> Result<()> {
        metrics::set_global_recorder(metrics::NoopRecorder)
            .map_err(|_| AppError::Other("metrics recorder already installed".to_string()))
    }

    /// Record database operation metrics
    pub fn record_db_operation(&self, operation: &str, duration: Duration, success: bool) {
        let status = if success { "success" } else { "error" };
        counter!(
            self.db_operations_total,
            "operation" => operation.to_string(),
            "status" => status
        )
        .increment(1);
        histogram!(self.db_operation_duration, "operation" => operation.to_string())
            .record(duration.as_secs_f64());

        if !success {
            counter!(self.errors_total, "type" => "database").increment(1);
        }
    }

    /// Record order-sheet import metrics
    pub fn record_order_import(&self, orders: usize, order_items: usize, duration: Duration) {
        counter!(self.orders_imported_total).increment(orders as u64);
        counter!(self.order_items_imported_total).increment(order_items as u64);
        histogram!(self.import_duration, "pipeline" => "order_sheet").record(duration.as_secs_f64());
    }

    /// Record customer CSV import metrics
    pub fn record_customer_import(&self, customers: usize, duration: Duration) {
        counter!(self.customers_imported_total).increment(customers as u64);
        histogram!(self.import_duration, "pipeline" => "customer_csv").record(duration.as_secs_f64());
    }

    /// Record rows an import silently skipped
    pub fn record_rows_skipped(&self, count: usize, reason: &str) {
        counter!(self.import_rows_skipped_total, "reason" => reason.to_string())
            .increment(count as u64);
    }

    /// Record error metrics
    pub fn record_error(&self, error_type: &str, operation: &str) {
        counter!(
            self.errors_total,
            "type" => error_type.to_string(),
            "operation" => operation.to_string()
        )
        .increment(1);
    }

    /// Update connection pool size
    pub fn update_connection_pool_size(&self, size: usize) {
        gauge!(self.db_connection_pool_size).set(size as f64);
    }
}
