//! Repository pattern for data access
//!
//! One repository per entity, all backed by the shared [`Database`] pool.
//! SQL strings are assembled from the [`crate::schema`] constants so the
//! queries and the migrations cannot drift apart silently.

use chrono::{NaiveDateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::db::Database;
use crate::error::{AppError, Result};
use crate::models::{
    Customer, CustomerUpdate, DeliveryType, Item, ItemUpdate, MeasurementType, NewCustomer,
    NewItem, NewOrder, NewOrderItem, NewWeekOrder, Order, OrderItem, OrderItemUpdate, OrderStatus,
    OrderUpdate, WeekOrder,
};
use crate::schema::{customers, items, order_items, orders, week_orders};
use crate::utils::week_key_for;

fn json_to_sql(value: Option<&serde_json::Value>) -> Option<String> {
    value.map(ToString::to_string)
}

fn json_from_sql(raw: Option<String>) -> Option<serde_json::Value> {
    raw.and_then(|s| serde_json::from_str(&s).ok())
}

fn map_customer(row: &Row<'_>) -> rusqlite::Result<Customer> {
    Ok(Customer {
        id: row.get(customers::ID)?,
        full_name: row.get(customers::FULL_NAME)?,
        email: row.get(customers::EMAIL)?,
        phone: row.get(customers::PHONE)?,
        address: row.get(customers::ADDRESS)?,
        default_delivery: DeliveryType::parse(&row.get::<_, String>(customers::DEFAULT_DELIVERY)?),
        in_neighborhood: row.get(customers::IN_NEIGHBORHOOD)?,
        metadata: json_from_sql(row.get(customers::METADATA)?),
        created_at: row.get(customers::CREATED_AT)?,
    })
}

fn map_item(row: &Row<'_>) -> rusqlite::Result<Item> {
    Ok(Item {
        id: row.get(items::ID)?,
        name: row.get(items::NAME)?,
        description: row.get(items::DESCRIPTION)?,
        cost_price: row.get(items::COST_PRICE)?,
        sale_price: row.get(items::SALE_PRICE)?,
        stock_quantity: row.get(items::STOCK_QUANTITY)?,
        measurement_type: MeasurementType::parse(
            &row.get::<_, String>(items::MEASUREMENT_TYPE)?,
        ),
        metadata: json_from_sql(row.get(items::METADATA)?),
        created_at: row.get(items::CREATED_AT)?,
    })
}

fn map_week_order(row: &Row<'_>) -> rusqlite::Result<WeekOrder> {
    Ok(WeekOrder {
        id: row.get(week_orders::ID)?,
        week_key: row.get(week_orders::WEEK_KEY)?,
        created_at: row.get(week_orders::CREATED_AT)?,
    })
}

fn map_order(row: &Row<'_>) -> rusqlite::Result<Order> {
    Ok(Order {
        id: row.get(orders::ID)?,
        customer_id: row.get(orders::CUSTOMER_ID)?,
        fee_price: row.get(orders::FEE_PRICE)?,
        order_date: row.get(orders::ORDER_DATE)?,
        status: OrderStatus::parse(&row.get::<_, String>(orders::STATUS)?),
        delivery_type: DeliveryType::parse(&row.get::<_, String>(orders::DELIVERY_TYPE)?),
        total_amount: row.get(orders::TOTAL_AMOUNT)?,
        week_order_id: row.get(orders::WEEK_ORDER_ID)?,
        metadata: json_from_sql(row.get(orders::METADATA)?),
    })
}

fn map_order_item(row: &Row<'_>) -> rusqlite::Result<OrderItem> {
    Ok(OrderItem {
        id: row.get(order_items::ID)?,
        order_id: row.get(order_items::ORDER_ID)?,
        item_id: row.get(order_items::ITEM_ID)?,
        quantity: row.get(order_items::QUANTITY)?,
        unit_price: row.get(order_items::UNIT_PRICE)?,
    })
}

fn insert_customer(
    conn: &Connection,
    new: &NewCustomer,
    created_at: NaiveDateTime,
) -> rusqlite::Result<i64> {
    conn.execute(
        &format!(
            "INSERT INTO {} ({}, {}, {}, {}, {}, {}, {}, {}) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            customers::TABLE,
            customers::FULL_NAME,
            customers::EMAIL,
            customers::PHONE,
            customers::ADDRESS,
            customers::DEFAULT_DELIVERY,
            customers::IN_NEIGHBORHOOD,
            customers::METADATA,
            customers::CREATED_AT,
        ),
        params![
            new.full_name,
            new.email,
            new.phone,
            new.address,
            new.default_delivery.as_str(),
            new.in_neighborhood,
            json_to_sql(new.metadata.as_ref()),
            created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Customer data access
pub struct CustomerRepository<'a> {
    db: &'a Database,
}

impl<'a> CustomerRepository<'a> {
    #[must_use]
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// All customers, ordered by name
    pub fn list(&self) -> Result<Vec<Customer>> {
        let conn = self.db.get_connection()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT * FROM {} ORDER BY {}",
            customers::TABLE,
            customers::FULL_NAME
        ))?;
        let rows = stmt.query_map([], map_customer)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn get(&self, id: i64) -> Result<Option<Customer>> {
        let conn = self.db.get_connection()?;
        Ok(conn
            .query_row(
                &format!(
                    "SELECT * FROM {} WHERE {} = ?",
                    customers::TABLE,
                    customers::ID
                ),
                params![id],
                map_customer,
            )
            .optional()?)
    }

    pub fn create(&self, new: &NewCustomer) -> Result<Customer> {
        let conn = self.db.get_connection()?;
        let id = insert_customer(&conn, new, Utc::now().naive_utc())?;
        self.get(id)?
            .ok_or_else(|| AppError::Other(format!("failed to read back customer {id}")))
    }

    /// Insert a batch of customers inside one transaction, returning the count
    pub fn bulk_create(&self, batch: &[NewCustomer]) -> Result<usize> {
        let mut conn = self.db.get_connection()?;
        let tx = conn.transaction()?;
        let created_at = Utc::now().naive_utc();
        for new in batch {
            insert_customer(&tx, new, created_at)?;
        }
        tx.commit()?;
        Ok(batch.len())
    }

    pub fn update(&self, id: i64, patch: CustomerUpdate) -> Result<Customer> {
        let existing = self
            .get(id)?
            .ok_or_else(|| AppError::NotFound(format!("customer {id}")))?;

        let full_name = patch.full_name.unwrap_or(existing.full_name);
        let email = patch.email.or(existing.email);
        let phone = patch.phone.or(existing.phone);
        let address = patch.address.or(existing.address);
        let default_delivery = patch.default_delivery.unwrap_or(existing.default_delivery);
        let in_neighborhood = patch.in_neighborhood.unwrap_or(existing.in_neighborhood);
        let metadata = patch.metadata.or(existing.metadata);

        let conn = self.db.get_connection()?;
        conn.execute(
            &format!(
                "UPDATE {} SET {} = ?, {} = ?, {} = ?, {} = ?, {} = ?, {} = ?, {} = ? WHERE {} = ?",
                customers::TABLE,
                customers::FULL_NAME,
                customers::EMAIL,
                customers::PHONE,
                customers::ADDRESS,
                customers::DEFAULT_DELIVERY,
                customers::IN_NEIGHBORHOOD,
                customers::METADATA,
                customers::ID,
            ),
            params![
                full_name,
                email,
                phone,
                address,
                default_delivery.as_str(),
                in_neighborhood,
                json_to_sql(metadata.as_ref()),
                id,
            ],
        )?;

        self.get(id)?
            .ok_or_else(|| AppError::NotFound(format!("customer {id}")))
    }

    pub fn delete(&self, id: i64) -> Result<bool> {
        let conn = self.db.get_connection()?;
        let affected = conn.execute(
            &format!("DELETE FROM {} WHERE {} = ?", customers::TABLE, customers::ID),
            params![id],
        )?;
        Ok(affected > 0)
    }

    /// Find a customer by the (name, phone) natural key, creating it with the
    /// import defaults (no delivery preference, inside the neighborhood) when
    /// it does not exist yet.
    pub fn find_or_create(&self, full_name: &str, phone: &str) -> Result<Customer> {
        let conn = self.db.get_connection()?;
        let found = conn
            .query_row(
                &format!(
                    "SELECT * FROM {} WHERE {} = ? AND COALESCE({}, '') = ?",
                    customers::TABLE,
                    customers::FULL_NAME,
                    customers::PHONE,
                ),
                params![full_name, phone],
                map_customer,
            )
            .optional()?;

        if let Some(customer) = found {
            return Ok(customer);
        }

        self.create(&NewCustomer {
            full_name: full_name.to_string(),
            email: None,
            phone: Some(phone.to_string()),
            address: None,
            default_delivery: DeliveryType::None,
            in_neighborhood: true,
            metadata: None,
        })
    }
}

fn insert_item(conn: &Connection, new: &NewItem, created_at: NaiveDateTime) -> rusqlite::Result<i64> {
    conn.execute(
        &format!(
            "INSERT INTO {} ({}, {}, {}, {}, {}, {}, {}, {}) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            items::TABLE,
            items::NAME,
            items::DESCRIPTION,
            items::COST_PRICE,
            items::SALE_PRICE,
            items::STOCK_QUANTITY,
            items::MEASUREMENT_TYPE,
            items::METADATA,
            items::CREATED_AT,
        ),
        params![
            new.name,
            new.description,
            new.cost_price,
            new.sale_price,
            new.stock_quantity,
            new.measurement_type.as_str(),
            json_to_sql(new.metadata.as_ref()),
            created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Inventory item data access
pub struct ItemRepository<'a> {
    db: &'a Database,
}

impl<'a> ItemRepository<'a> {
    #[must_use]
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// All items, ordered by name
    pub fn list(&self) -> Result<Vec<Item>> {
        let conn = self.db.get_connection()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT * FROM {} ORDER BY {}",
            items::TABLE,
            items::NAME
        ))?;
        let rows = stmt.query_map([], map_item)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn get(&self, id: i64) -> Result<Option<Item>> {
        let conn = self.db.get_connection()?;
        Ok(conn
            .query_row(
                &format!("SELECT * FROM {} WHERE {} = ?", items::TABLE, items::ID),
                params![id],
                map_item,
            )
            .optional()?)
    }

    /// First item with the given name; name is the import natural key
    pub fn find_by_name(&self, name: &str) -> Result<Option<Item>> {
        let conn = self.db.get_connection()?;
        Ok(conn
            .query_row(
                &format!(
                    "SELECT * FROM {} WHERE {} = ? ORDER BY {} LIMIT 1",
                    items::TABLE,
                    items::NAME,
                    items::ID
                ),
                params![name],
                map_item,
            )
            .optional()?)
    }

    pub fn create(&self, new: &NewItem) -> Result<Item> {
        let conn = self.db.get_connection()?;
        let id = insert_item(&conn, new, Utc::now().naive_utc())?;
        self.get(id)?
            .ok_or_else(|| AppError::Other(format!("failed to read back item {id}")))
    }

    /// Insert a batch of items inside one transaction, returning the count
    pub fn bulk_create(&self, batch: &[NewItem]) -> Result<usize> {
        let mut conn = self.db.get_connection()?;
        let tx = conn.transaction()?;
        let created_at = Utc::now().naive_utc();
        for new in batch {
            insert_item(&tx, new, created_at)?;
        }
        tx.commit()?;
        Ok(batch.len())
    }

    /// Find an item by name or create it; the boolean is true when created
    pub fn find_or_create(&self, new: &NewItem) -> Result<(Item, bool)> {
        if let Some(item) = self.find_by_name(&new.name)? {
            return Ok((item, false));
        }
        Ok((self.create(new)?, true))
    }

    /// Overwrite both price fields, returning the updated item
    pub fn update_prices(&self, id: i64, price: f64) -> Result<Item> {
        let conn = self.db.get_connection()?;
        conn.execute(
            &format!(
                "UPDATE {} SET {} = ?, {} = ? WHERE {} = ?",
                items::TABLE,
                items::COST_PRICE,
                items::SALE_PRICE,
                items::ID
            ),
            params![price, price, id],
        )?;
        self.get(id)?
            .ok_or_else(|| AppError::NotFound(format!("item {id}")))
    }

    pub fn update(&self, id: i64, patch: ItemUpdate) -> Result<Item> {
        let existing = self
            .get(id)?
            .ok_or_else(|| AppError::NotFound(format!("item {id}")))?;

        let name = patch.name.unwrap_or(existing.name);
        let description = patch.description.or(existing.description);
        let cost_price = patch.cost_price.unwrap_or(existing.cost_price);
        let sale_price = patch.sale_price.unwrap_or(existing.sale_price);
        let stock_quantity = patch.stock_quantity.unwrap_or(existing.stock_quantity);
        let measurement_type = patch.measurement_type.unwrap_or(existing.measurement_type);
        let metadata = patch.metadata.or(existing.metadata);

        let conn = self.db.get_connection()?;
        conn.execute(
            &format!(
                "UPDATE {} SET {} = ?, {} = ?, {} = ?, {} = ?, {} = ?, {} = ?, {} = ? WHERE {} = ?",
                items::TABLE,
                items::NAME,
                items::DESCRIPTION,
                items::COST_PRICE,
                items::SALE_PRICE,
                items::STOCK_QUANTITY,
                items::MEASUREMENT_TYPE,
                items::METADATA,
                items::ID,
            ),
            params![
                name,
                description,
                cost_price,
                sale_price,
                stock_quantity,
                measurement_type.as_str(),
                json_to_sql(metadata.as_ref()),
                id,
            ],
        )?;

        self.get(id)?
            .ok_or_else(|| AppError::NotFound(format!("item {id}")))
    }

    pub fn delete(&self, id: i64) -> Result<bool> {
        let conn = self.db.get_connection()?;
        let affected = conn.execute(
            &format!("DELETE FROM {} WHERE {} = ?", items::TABLE, items::ID),
            params![id],
        )?;
        Ok(affected > 0)
    }
}

/// Weekly batch data access
pub struct WeekOrderRepository<'a> {
    db: &'a Database,
}

impl<'a> WeekOrderRepository<'a> {
    #[must_use]
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub fn list(&self) -> Result<Vec<WeekOrder>> {
        let conn = self.db.get_connection()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT * FROM {} ORDER BY {}",
            week_orders::TABLE,
            week_orders::WEEK_KEY
        ))?;
        let rows = stmt.query_map([], map_week_order)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn get(&self, id: i64) -> Result<Option<WeekOrder>> {
        let conn = self.db.get_connection()?;
        Ok(conn
            .query_row(
                &format!(
                    "SELECT * FROM {} WHERE {} = ?",
                    week_orders::TABLE,
                    week_orders::ID
                ),
                params![id],
                map_week_order,
            )
            .optional()?)
    }

    pub fn create(&self, new: &NewWeekOrder) -> Result<WeekOrder> {
        let conn = self.db.get_connection()?;
        conn.execute(
            &format!(
                "INSERT INTO {} ({}, {}) VALUES (?, ?)",
                week_orders::TABLE,
                week_orders::WEEK_KEY,
                week_orders::CREATED_AT
            ),
            params![new.week_key, Utc::now().naive_utc()],
        )?;
        let id = conn.last_insert_rowid();
        self.get(id)?
            .ok_or_else(|| AppError::Other(format!("failed to read back week order {id}")))
    }

    /// Insert a batch of weekly batches inside one transaction
    pub fn bulk_create(&self, batch: &[NewWeekOrder]) -> Result<usize> {
        let mut conn = self.db.get_connection()?;
        let tx = conn.transaction()?;
        let created_at = Utc::now().naive_utc();
        for new in batch {
            tx.execute(
                &format!(
                    "INSERT INTO {} ({}, {}) VALUES (?, ?)",
                    week_orders::TABLE,
                    week_orders::WEEK_KEY,
                    week_orders::CREATED_AT
                ),
                params![new.week_key, created_at],
            )?;
        }
        tx.commit()?;
        Ok(batch.len())
    }

    /// Re-key a batch, e.g. after a mislabeled import
    pub fn update_key(&self, id: i64, week_key: &str) -> Result<WeekOrder> {
        let conn = self.db.get_connection()?;
        conn.execute(
            &format!(
                "UPDATE {} SET {} = ? WHERE {} = ?",
                week_orders::TABLE,
                week_orders::WEEK_KEY,
                week_orders::ID
            ),
            params![week_key, id],
        )?;
        self.get(id)?
            .ok_or_else(|| AppError::NotFound(format!("week order {id}")))
    }

    pub fn delete(&self, id: i64) -> Result<bool> {
        let conn = self.db.get_connection()?;
        let affected = conn.execute(
            &format!(
                "DELETE FROM {} WHERE {} = ?",
                week_orders::TABLE,
                week_orders::ID
            ),
            params![id],
        )?;
        Ok(affected > 0)
    }

    /// Get the batch row for a week key, creating it on first use
    pub fn find_or_create(&self, week_key: &str) -> Result<WeekOrder> {
        let conn = self.db.get_connection()?;
        conn.execute(
            &format!(
                "INSERT OR IGNORE INTO {} ({}, {}) VALUES (?, ?)",
                week_orders::TABLE,
                week_orders::WEEK_KEY,
                week_orders::CREATED_AT
            ),
            params![week_key, Utc::now().naive_utc()],
        )?;
        conn.query_row(
            &format!(
                "SELECT * FROM {} WHERE {} = ?",
                week_orders::TABLE,
                week_orders::WEEK_KEY
            ),
            params![week_key],
            map_week_order,
        )
        .map_err(AppError::from)
    }
}

/// Order data access
pub struct OrderRepository<'a> {
    db: &'a Database,
}

impl<'a> OrderRepository<'a> {
    #[must_use]
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub fn list(&self) -> Result<Vec<Order>> {
        let conn = self.db.get_connection()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT * FROM {} ORDER BY {}",
            orders::TABLE,
            orders::ID
        ))?;
        let rows = stmt.query_map([], map_order)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn get(&self, id: i64) -> Result<Option<Order>> {
        let conn = self.db.get_connection()?;
        Ok(conn
            .query_row(
                &format!("SELECT * FROM {} WHERE {} = ?", orders::TABLE, orders::ID),
                params![id],
                map_order,
            )
            .optional()?)
    }

    /// Create an order; without an explicit batch the week is derived from
    /// the order date and the `week_orders` row is created on first use.
    pub fn create(&self, new: &NewOrder) -> Result<Order> {
        let order_date = Utc::now().naive_utc();
        let week_order_id = match new.week_order_id {
            Some(id) => Some(id),
            None => Some(
                WeekOrderRepository::new(self.db)
                    .find_or_create(&week_key_for(order_date))?
                    .id,
            ),
        };

        let conn = self.db.get_connection()?;
        conn.execute(
            &format!(
                "INSERT INTO {} ({}, {}, {}, {}, {}, {}, {}, {}) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
                orders::TABLE,
                orders::CUSTOMER_ID,
                orders::FEE_PRICE,
                orders::ORDER_DATE,
                orders::STATUS,
                orders::DELIVERY_TYPE,
                orders::TOTAL_AMOUNT,
                orders::WEEK_ORDER_ID,
                orders::METADATA,
            ),
            params![
                new.customer_id,
                new.fee_price,
                order_date,
                new.status.as_str(),
                new.delivery_type.as_str(),
                new.total_amount,
                week_order_id,
                json_to_sql(new.metadata.as_ref()),
            ],
        )?;
        let id = conn.last_insert_rowid();
        self.get(id)?
            .ok_or_else(|| AppError::Other(format!("failed to read back order {id}")))
    }

    /// Insert a batch of orders, each assigned to its week batch
    pub fn bulk_create(&self, batch: &[NewOrder]) -> Result<usize> {
        for new in batch {
            self.create(new)?;
        }
        Ok(batch.len())
    }

    pub fn update(&self, id: i64, patch: OrderUpdate) -> Result<Order> {
        let existing = self
            .get(id)?
            .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

        let fee_price = patch.fee_price.unwrap_or(existing.fee_price);
        let status = patch.status.unwrap_or(existing.status);
        let delivery_type = patch.delivery_type.unwrap_or(existing.delivery_type);
        let total_amount = patch.total_amount.unwrap_or(existing.total_amount);
        let week_order_id = patch.week_order_id.or(existing.week_order_id);
        let metadata = patch.metadata.or(existing.metadata);

        let conn = self.db.get_connection()?;
        conn.execute(
            &format!(
                "UPDATE {} SET {} = ?, {} = ?, {} = ?, {} = ?, {} = ?, {} = ? WHERE {} = ?",
                orders::TABLE,
                orders::FEE_PRICE,
                orders::STATUS,
                orders::DELIVERY_TYPE,
                orders::TOTAL_AMOUNT,
                orders::WEEK_ORDER_ID,
                orders::METADATA,
                orders::ID,
            ),
            params![
                fee_price,
                status.as_str(),
                delivery_type.as_str(),
                total_amount,
                week_order_id,
                json_to_sql(metadata.as_ref()),
                id,
            ],
        )?;

        self.get(id)?
            .ok_or_else(|| AppError::NotFound(format!("order {id}")))
    }

    pub fn delete(&self, id: i64) -> Result<bool> {
        let conn = self.db.get_connection()?;
        let affected = conn.execute(
            &format!("DELETE FROM {} WHERE {} = ?", orders::TABLE, orders::ID),
            params![id],
        )?;
        Ok(affected > 0)
    }
}

fn insert_order_item(conn: &Connection, new: &NewOrderItem) -> rusqlite::Result<i64> {
    conn.execute(
        &format!(
            "INSERT INTO {} ({}, {}, {}, {}) VALUES (?, ?, ?, ?)",
            order_items::TABLE,
            order_items::ORDER_ID,
            order_items::ITEM_ID,
            order_items::QUANTITY,
            order_items::UNIT_PRICE,
        ),
        params![new.order_id, new.item_id, new.quantity, new.unit_price],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Order line item data access
pub struct OrderItemRepository<'a> {
    db: &'a Database,
}

impl<'a> OrderItemRepository<'a> {
    #[must_use]
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub fn list(&self) -> Result<Vec<OrderItem>> {
        let conn = self.db.get_connection()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT * FROM {} ORDER BY {}",
            order_items::TABLE,
            order_items::ID
        ))?;
        let rows = stmt.query_map([], map_order_item)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Line items belonging to one order
    pub fn list_for_order(&self, order_id: i64) -> Result<Vec<OrderItem>> {
        let conn = self.db.get_connection()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT * FROM {} WHERE {} = ? ORDER BY {}",
            order_items::TABLE,
            order_items::ORDER_ID,
            order_items::ID
        ))?;
        let rows = stmt.query_map(params![order_id], map_order_item)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn get(&self, id: i64) -> Result<Option<OrderItem>> {
        let conn = self.db.get_connection()?;
        Ok(conn
            .query_row(
                &format!(
                    "SELECT * FROM {} WHERE {} = ?",
                    order_items::TABLE,
                    order_items::ID
                ),
                params![id],
                map_order_item,
            )
            .optional()?)
    }

    pub fn create(&self, new: &NewOrderItem) -> Result<OrderItem> {
        let conn = self.db.get_connection()?;
        let id = insert_order_item(&conn, new)?;
        self.get(id)?
            .ok_or_else(|| AppError::Other(format!("failed to read back order item {id}")))
    }

    /// Insert a batch of line items inside one transaction
    pub fn bulk_create(&self, batch: &[NewOrderItem]) -> Result<usize> {
        let mut conn = self.db.get_connection()?;
        let tx = conn.transaction()?;
        for new in batch {
            insert_order_item(&tx, new)?;
        }
        tx.commit()?;
        Ok(batch.len())
    }

    pub fn update(&self, id: i64, patch: OrderItemUpdate) -> Result<OrderItem> {
        let existing = self
            .get(id)?
            .ok_or_else(|| AppError::NotFound(format!("order item {id}")))?;

        let quantity = patch.quantity.unwrap_or(existing.quantity);
        let unit_price = patch.unit_price.unwrap_or(existing.unit_price);

        let conn = self.db.get_connection()?;
        conn.execute(
            &format!(
                "UPDATE {} SET {} = ?, {} = ? WHERE {} = ?",
                order_items::TABLE,
                order_items::QUANTITY,
                order_items::UNIT_PRICE,
                order_items::ID
            ),
            params![quantity, unit_price, id],
        )?;

        self.get(id)?
            .ok_or_else(|| AppError::NotFound(format!("order item {id}")))
    }

    pub fn delete(&self, id: i64) -> Result<bool> {
        let conn = self.db.get_connection()?;
        let affected = conn.execute(
            &format!(
                "DELETE FROM {} WHERE {} = ?",
                order_items::TABLE,
                order_items::ID
            ),
            params![id],
        )?;
        Ok(affected > 0)
    }
}
