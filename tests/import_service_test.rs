//! End-to-end tests for the order-sheet import and its reconciliation

use basta::db::Database;
use basta::models::{DeliveryType, MeasurementType, OrderStatus};
use basta::order_sheet::scan_grid;
use basta::repository::{
    CustomerRepository, ItemRepository, OrderItemRepository, OrderRepository,
    WeekOrderRepository,
};
use basta::service::ImportService;
use basta::utils::week_key_for;
use tempfile::TempDir;

fn test_db() -> (TempDir, Database) {
    let dir = tempfile::tempdir().expect("failed to create temp directory");
    let path = dir.path().join("test.db");
    let db = Database::new(path.to_str().expect("utf-8 path"), 2).expect("failed to open database");
    (dir, db)
}

/// Build a grid row from cell texts; empty strings become absent cells
fn row(cells: &[&str]) -> Vec<Option<String>> {
    cells
        .iter()
        .map(|c| {
            if c.is_empty() {
                None
            } else {
                Some((*c).to_string())
            }
        })
        .collect()
}

fn week_sheet(price: &str) -> Vec<Vec<Option<String>>> {
    vec![
        row(&["רות כהן איסוף: לוד 0521234567", "", ""]),
        row(&["מוצר", "כמות", "מחיר"]),
        row(&["עגבניות שרי", "2.5 ק\"ג", price]),
        row(&["תוספות", "", "10 ש\"ח"]),
        row(&["סך הכל", "", "35 ש\"ח"]),
    ]
}

#[test]
fn commit_creates_customer_order_and_items() {
    let (_dir, db) = test_db();
    let sheet = scan_grid(&week_sheet("25"));

    let summary = ImportService::new(&db)
        .commit_sheet(&sheet)
        .expect("commit succeeds");
    assert_eq!(summary.orders_created, 1);
    assert_eq!(summary.order_items_created, 1);

    // Customer created with the import defaults
    let customers = CustomerRepository::new(&db).list().expect("list customers");
    assert_eq!(customers.len(), 1);
    let customer = &customers[0];
    assert_eq!(customer.full_name, "רות כהן");
    assert_eq!(customer.phone.as_deref(), Some("0521234567"));
    assert_eq!(customer.default_delivery, DeliveryType::None);
    assert!(customer.in_neighborhood);

    // Order carries the parsed fee and declared total
    let orders = OrderRepository::new(&db).list().expect("list orders");
    assert_eq!(orders.len(), 1);
    let order = &orders[0];
    assert_eq!(order.customer_id, customer.id);
    assert_eq!(order.fee_price, 10.0);
    assert_eq!(order.total_amount, 35.0);
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.delivery_type, DeliveryType::None);

    // Item created from the line with the derived unit price
    let items = ItemRepository::new(&db).list().expect("list items");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "עגבניות שרי");
    assert_eq!(items[0].cost_price, 10.0);
    assert_eq!(items[0].sale_price, 10.0);
    assert_eq!(items[0].measurement_type, MeasurementType::Weight);

    // Line item snapshots the quantity and sale price
    let lines = OrderItemRepository::new(&db)
        .list_for_order(order.id)
        .expect("list order items");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].quantity, 2.5);
    assert_eq!(lines[0].unit_price, 10.0);
}

#[test]
fn reimport_at_new_price_updates_item_in_place() {
    let (_dir, db) = test_db();
    let service = ImportService::new(&db);

    service
        .commit_sheet(&scan_grid(&week_sheet("25")))
        .expect("first import");
    service
        .commit_sheet(&scan_grid(&week_sheet("30")))
        .expect("second import");

    // Still a single item row, with both prices pulled up
    let items = ItemRepository::new(&db).list().expect("list items");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].cost_price, 12.0);
    assert_eq!(items[0].sale_price, 12.0);

    // Still a single customer, found again by (name, phone)
    assert_eq!(
        CustomerRepository::new(&db).list().expect("customers").len(),
        1
    );

    // The first order's line keeps its unit price snapshot
    let orders = OrderRepository::new(&db).list().expect("orders");
    assert_eq!(orders.len(), 2);
    let order_items = OrderItemRepository::new(&db);
    let first = order_items
        .list_for_order(orders[0].id)
        .expect("first order lines");
    let second = order_items
        .list_for_order(orders[1].id)
        .expect("second order lines");
    assert_eq!(first[0].unit_price, 10.0);
    assert_eq!(second[0].unit_price, 12.0);
}

#[test]
fn imported_orders_land_in_the_current_week_batch() {
    let (_dir, db) = test_db();
    ImportService::new(&db)
        .commit_sheet(&scan_grid(&week_sheet("25")))
        .expect("import");

    let orders = OrderRepository::new(&db).list().expect("orders");
    let week_id = orders[0].week_order_id.expect("order has a week batch");
    let week = WeekOrderRepository::new(&db)
        .get(week_id)
        .expect("get week")
        .expect("week exists");
    assert_eq!(week.week_key, week_key_for(orders[0].order_date));
}

#[test]
fn missing_fee_and_total_default_to_zero() {
    let (_dir, db) = test_db();
    let sheet = scan_grid(&[
        row(&["דוד לוי איסוף: לוד 053", "", ""]),
        row(&["חלה", "2", "24"]),
    ]);

    ImportService::new(&db).commit_sheet(&sheet).expect("import");

    let orders = OrderRepository::new(&db).list().expect("orders");
    assert_eq!(orders[0].fee_price, 0.0);
    assert_eq!(orders[0].total_amount, 0.0);
}

#[test]
fn workbook_import_runs_the_full_pipeline() {
    let (_dir, db) = test_db();
    let bytes = include_bytes!("fixtures/week_orders.xlsx");

    let summary = ImportService::new(&db)
        .import_order_sheet(bytes)
        .expect("workbook import");
    assert_eq!(summary.orders_created, 2);
    assert_eq!(summary.order_items_created, 3);

    let items = ItemRepository::new(&db).list().expect("items");
    assert_eq!(items.len(), 3);
}

#[test]
fn invalid_workbook_bytes_fail_without_writes() {
    let (_dir, db) = test_db();

    assert!(ImportService::new(&db).import_order_sheet(b"junk").is_err());
    assert!(OrderRepository::new(&db).list().expect("orders").is_empty());
}
