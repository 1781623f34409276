//! Import services
//!
//! The two bulk-import pipelines: the weekly order-sheet workbook and the
//! customer CSV. Parsing stays in [`crate::order_sheet`] and the CSV reader;
//! this module owns the reconcile-on-commit semantics against the store.

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use crate::db::Database;
use crate::error::Result;
use crate::metrics::MetricsCollector;
use crate::models::{DeliveryType, NewCustomer, NewItem, NewOrder, NewOrderItem, OrderStatus};
use crate::order_sheet::{self, OrderSheet};
use crate::repository::{
    CustomerRepository, ItemRepository, OrderItemRepository, OrderRepository,
};

/// Address value that marks a customer as living outside the neighborhood
pub const OUTSIDE_NEIGHBORHOOD: &str = "מחוץ לשכונה";

/// Counts returned by the order-sheet import
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ImportSummary {
    pub orders_created: usize,
    pub order_items_created: usize,
}

/// Count returned by the customer CSV import
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CustomerCsvSummary {
    pub customers_created: usize,
}

/// Import pipelines over one database
pub struct ImportService<'a> {
    db: &'a Database,
    metrics: MetricsCollector,
}

impl<'a> ImportService<'a> {
    #[must_use]
    pub fn new(db: &'a Database) -> Self {
        Self {
            db,
            metrics: MetricsCollector::default(),
        }
    }

    /// Decode an uploaded XLSX order sheet and commit its blocks
    pub fn import_order_sheet(&self, bytes: &[u8]) -> Result<ImportSummary> {
        let start = Instant::now();
        let sheet = match order_sheet::parse_workbook(bytes) {
            Ok(sheet) => sheet,
            Err(e) => {
                self.metrics.record_error("decode", "order_sheet_import");
                return Err(e);
            }
        };
        debug!(blocks = sheet.blocks.len(), "order sheet scanned");

        let summary = self.commit_sheet(&sheet)?;
        self.metrics.record_order_import(
            summary.orders_created,
            summary.order_items_created,
            start.elapsed(),
        );
        info!(
            orders = summary.orders_created,
            order_items = summary.order_items_created,
            "order sheet imported"
        );
        Ok(summary)
    }

    /// Reconcile scanned blocks into customer/order/item rows.
    ///
    /// Per block: find-or-create the customer by (name, phone); create one
    /// order carrying the customer's default delivery type and the parsed
    /// fee/total; per product line, find-or-create the item by name, pull
    /// both price fields up to the observed unit price when they differ, and
    /// snapshot the item's sale price onto the new line item.
    pub fn commit_sheet(&self, sheet: &OrderSheet) -> Result<ImportSummary> {
        let customer_repo = CustomerRepository::new(self.db);
        let item_repo = ItemRepository::new(self.db);
        let order_repo = OrderRepository::new(self.db);
        let order_item_repo = OrderItemRepository::new(self.db);

        let mut summary = ImportSummary::default();

        for block in &sheet.blocks {
            let customer = customer_repo.find_or_create(&block.name, &block.phone)?;

            let order = order_repo.create(&NewOrder {
                customer_id: customer.id,
                fee_price: block.fee.unwrap_or(0.0),
                status: OrderStatus::Pending,
                delivery_type: customer.default_delivery,
                total_amount: block.total.unwrap_or(0.0),
                week_order_id: None,
                metadata: None,
            })?;
            summary.orders_created += 1;

            for line in &block.lines {
                let (mut item, created) = item_repo.find_or_create(&NewItem {
                    name: line.name.clone(),
                    description: None,
                    cost_price: line.unit_price,
                    sale_price: line.unit_price,
                    stock_quantity: 0.0,
                    measurement_type: line.measurement_type,
                    metadata: None,
                })?;

                if !created
                    && (item.cost_price != line.unit_price || item.sale_price != line.unit_price)
                {
                    item = item_repo.update_prices(item.id, line.unit_price)?;
                }

                order_item_repo.create(&NewOrderItem {
                    order_id: order.id,
                    item_id: item.id,
                    quantity: line.quantity,
                    unit_price: item.sale_price,
                })?;
                summary.order_items_created += 1;
            }
        }

        Ok(summary)
    }

    /// Import customers from an uploaded CSV
    pub fn import_customers_csv(&self, bytes: &[u8]) -> Result<CustomerCsvSummary> {
        let start = Instant::now();
        let (parsed, skipped) = parse_customer_rows(bytes);
        if skipped > 0 {
            self.metrics.record_rows_skipped(skipped, "short_row");
        }

        let created = CustomerRepository::new(self.db).bulk_create(&parsed)?;
        self.metrics.record_customer_import(created, start.elapsed());
        info!(customers = created, skipped, "customer CSV imported");
        Ok(CustomerCsvSummary {
            customers_created: created,
        })
    }
}

/// Parse customer CSV rows of the form (first name, last name, phone digits,
/// address). Returns the parsed customers and the number of skipped rows.
///
/// The phone column carries digits without the leading zero, which is
/// prepended here. The fixed out-of-neighborhood address value clears the
/// address and the neighborhood flag. Rows with fewer than four columns are
/// skipped, never an error.
#[must_use]
pub fn parse_customer_rows(bytes: &[u8]) -> (Vec<NewCustomer>, usize) {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut parsed = Vec::new();
    let mut skipped = 0usize;

    for record in reader.records() {
        let Ok(record) = record else {
            skipped += 1;
            continue;
        };
        if record.len() < 4 {
            skipped += 1;
            continue;
        }

        let full_name = format!("{} {}", &record[0], &record[1]);
        let phone = format!("0{}", &record[2]);
        let address_raw = record[3].trim();
        let (address, in_neighborhood) = if address_raw == OUTSIDE_NEIGHBORHOOD {
            (String::new(), false)
        } else {
            (address_raw.to_string(), true)
        };

        parsed.push(NewCustomer {
            full_name,
            email: None,
            phone: Some(phone),
            address: Some(address),
            default_delivery: DeliveryType::None,
            in_neighborhood,
            metadata: None,
        });
    }

    (parsed, skipped)
}
