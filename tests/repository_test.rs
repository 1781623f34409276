//! Repository integration tests against a temp-dir SQLite database

use basta::db::Database;
use basta::models::{
    CustomerUpdate, DeliveryType, MeasurementType, NewCustomer, NewItem, NewOrder, NewOrderItem,
    OrderStatus, OrderUpdate,
};
use basta::repository::{
    CustomerRepository, ItemRepository, OrderItemRepository, OrderRepository,
    WeekOrderRepository,
};
use basta::utils::week_key_for;
use tempfile::TempDir;

fn test_db() -> (TempDir, Database) {
    let dir = tempfile::tempdir().expect("failed to create temp directory");
    let path = dir.path().join("test.db");
    let db = Database::new(path.to_str().expect("utf-8 path"), 2).expect("failed to open database");
    (dir, db)
}

fn sample_customer(name: &str) -> NewCustomer {
    NewCustomer {
        full_name: name.to_string(),
        email: None,
        phone: Some("0521234567".to_string()),
        address: Some("רחוב הרצל 12".to_string()),
        default_delivery: DeliveryType::Delivery,
        in_neighborhood: true,
        metadata: None,
    }
}

fn sample_item(name: &str) -> NewItem {
    NewItem {
        name: name.to_string(),
        description: None,
        cost_price: 8.0,
        sale_price: 10.0,
        stock_quantity: 0.0,
        measurement_type: MeasurementType::Countable,
        metadata: None,
    }
}

#[test]
fn customer_crud_round_trip() {
    let (_dir, db) = test_db();
    let repo = CustomerRepository::new(&db);

    let created = repo.create(&sample_customer("רות כהן")).expect("create");
    assert_eq!(created.full_name, "רות כהן");
    assert_eq!(created.default_delivery, DeliveryType::Delivery);

    let fetched = repo.get(created.id).expect("get").expect("exists");
    assert_eq!(fetched.phone.as_deref(), Some("0521234567"));

    let updated = repo
        .update(
            created.id,
            CustomerUpdate {
                address: Some("רחוב ביאליק 3".to_string()),
                in_neighborhood: Some(false),
                ..CustomerUpdate::default()
            },
        )
        .expect("update");
    assert_eq!(updated.address.as_deref(), Some("רחוב ביאליק 3"));
    assert!(!updated.in_neighborhood);
    // Untouched fields survive the partial update
    assert_eq!(updated.full_name, "רות כהן");

    assert!(repo.delete(created.id).expect("delete"));
    assert!(repo.get(created.id).expect("get after delete").is_none());
    assert!(!repo.delete(created.id).expect("second delete"));
}

#[test]
fn customer_metadata_round_trips_as_json() {
    let (_dir, db) = test_db();
    let repo = CustomerRepository::new(&db);

    let mut new = sample_customer("דוד לוי");
    new.metadata = Some(serde_json::json!({ "notes": "מעדיף משלוח בבוקר", "floor": 3 }));
    let created = repo.create(&new).expect("create");

    let metadata = created.metadata.expect("metadata kept");
    assert_eq!(metadata["floor"], 3);
}

#[test]
fn find_or_create_customer_reuses_the_natural_key() {
    let (_dir, db) = test_db();
    let repo = CustomerRepository::new(&db);

    let first = repo.find_or_create("רות כהן", "0521234567").expect("create");
    let second = repo.find_or_create("רות כהן", "0521234567").expect("reuse");
    assert_eq!(first.id, second.id);

    // Same name with a different phone is a different customer
    let third = repo.find_or_create("רות כהן", "0539999999").expect("other");
    assert_ne!(first.id, third.id);

    // Created rows default to no preference, inside the neighborhood
    assert_eq!(first.default_delivery, DeliveryType::None);
    assert!(first.in_neighborhood);
}

#[test]
fn bulk_create_customers_counts_rows() {
    let (_dir, db) = test_db();
    let repo = CustomerRepository::new(&db);

    let created = repo
        .bulk_create(&[sample_customer("א"), sample_customer("ב")])
        .expect("bulk");
    assert_eq!(created, 2);
    assert_eq!(repo.list().expect("list").len(), 2);
}

#[test]
fn item_find_or_create_and_price_update() {
    let (_dir, db) = test_db();
    let repo = ItemRepository::new(&db);

    let (item, created) = repo.find_or_create(&sample_item("חלה")).expect("create");
    assert!(created);

    let (again, created) = repo.find_or_create(&sample_item("חלה")).expect("reuse");
    assert!(!created);
    assert_eq!(item.id, again.id);

    let updated = repo.update_prices(item.id, 12.5).expect("update prices");
    assert_eq!(updated.cost_price, 12.5);
    assert_eq!(updated.sale_price, 12.5);
    assert_eq!(repo.list().expect("list").len(), 1);
}

#[test]
fn order_creation_derives_the_week_batch() {
    let (_dir, db) = test_db();
    let customer = CustomerRepository::new(&db)
        .create(&sample_customer("רות"))
        .expect("customer");

    let order = OrderRepository::new(&db)
        .create(&NewOrder {
            customer_id: customer.id,
            fee_price: 5.0,
            status: OrderStatus::Pending,
            delivery_type: DeliveryType::MorningDelivery,
            total_amount: 120.0,
            week_order_id: None,
            metadata: None,
        })
        .expect("order");

    let week_id = order.week_order_id.expect("week assigned");
    let week = WeekOrderRepository::new(&db)
        .get(week_id)
        .expect("get week")
        .expect("week exists");
    assert_eq!(week.week_key, week_key_for(order.order_date));

    // A second order in the same week reuses the batch row
    let second = OrderRepository::new(&db)
        .create(&NewOrder {
            customer_id: customer.id,
            fee_price: 0.0,
            status: OrderStatus::Pending,
            delivery_type: DeliveryType::None,
            total_amount: 0.0,
            week_order_id: None,
            metadata: None,
        })
        .expect("second order");
    assert_eq!(second.week_order_id, Some(week_id));
}

#[test]
fn order_update_changes_status() {
    let (_dir, db) = test_db();
    let customer = CustomerRepository::new(&db)
        .create(&sample_customer("רות"))
        .expect("customer");
    let repo = OrderRepository::new(&db);
    let order = repo
        .create(&NewOrder {
            customer_id: customer.id,
            fee_price: 0.0,
            status: OrderStatus::Pending,
            delivery_type: DeliveryType::None,
            total_amount: 0.0,
            week_order_id: None,
            metadata: None,
        })
        .expect("order");

    let updated = repo
        .update(
            order.id,
            OrderUpdate {
                status: Some(OrderStatus::Completed),
                ..OrderUpdate::default()
            },
        )
        .expect("update");
    assert_eq!(updated.status, OrderStatus::Completed);
    assert_eq!(updated.order_date, order.order_date);
}

#[test]
fn deleting_an_order_cascades_to_its_line_items() {
    let (_dir, db) = test_db();
    let customer = CustomerRepository::new(&db)
        .create(&sample_customer("רות"))
        .expect("customer");
    let (item, _) = ItemRepository::new(&db)
        .find_or_create(&sample_item("חלה"))
        .expect("item");
    let order = OrderRepository::new(&db)
        .create(&NewOrder {
            customer_id: customer.id,
            fee_price: 0.0,
            status: OrderStatus::Pending,
            delivery_type: DeliveryType::None,
            total_amount: 0.0,
            week_order_id: None,
            metadata: None,
        })
        .expect("order");

    let line_repo = OrderItemRepository::new(&db);
    line_repo
        .create(&NewOrderItem {
            order_id: order.id,
            item_id: item.id,
            quantity: 2.0,
            unit_price: 10.0,
        })
        .expect("line");

    assert!(OrderRepository::new(&db).delete(order.id).expect("delete"));
    assert!(line_repo.list().expect("list").is_empty());
}

#[test]
fn week_order_find_or_create_is_idempotent() {
    let (_dir, db) = test_db();
    let repo = WeekOrderRepository::new(&db);

    let first = repo.find_or_create("2025-W36").expect("create");
    let second = repo.find_or_create("2025-W36").expect("reuse");
    assert_eq!(first.id, second.id);
    assert_eq!(repo.list().expect("list").len(), 1);
}

#[test]
fn line_items_keep_their_price_snapshot() {
    let (_dir, db) = test_db();
    let customer = CustomerRepository::new(&db)
        .create(&sample_customer("רות"))
        .expect("customer");
    let item_repo = ItemRepository::new(&db);
    let (item, _) = item_repo.find_or_create(&sample_item("חלה")).expect("item");
    let order = OrderRepository::new(&db)
        .create(&NewOrder {
            customer_id: customer.id,
            fee_price: 0.0,
            status: OrderStatus::Pending,
            delivery_type: DeliveryType::None,
            total_amount: 0.0,
            week_order_id: None,
            metadata: None,
        })
        .expect("order");
    let line = OrderItemRepository::new(&db)
        .create(&NewOrderItem {
            order_id: order.id,
            item_id: item.id,
            quantity: 1.0,
            unit_price: item.sale_price,
        })
        .expect("line");

    // Raising the item price later must not touch the captured price
    item_repo.update_prices(item.id, 99.0).expect("reprice");
    let line = OrderItemRepository::new(&db)
        .get(line.id)
        .expect("get line")
        .expect("line exists");
    assert_eq!(line.unit_price, 10.0);
}
