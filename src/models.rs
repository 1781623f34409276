//! Data models for the back-office entities
//!
//! This module contains all data structures used throughout the application:
//! customers, inventory items, weekly order batches, orders, and order line
//! items, together with the payload structs used to create and update them.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// How an order leaves the store.
///
/// Customers carry a default; each order captures its own copy at creation
/// time so a later preference change does not rewrite order history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryType {
    /// No delivery, customer picks up
    #[default]
    None,
    /// Packed for pickup
    Package,
    /// Packed for early-morning pickup
    MorningPackage,
    /// Delivered to the customer
    Delivery,
    /// Delivered in the early morning
    MorningDelivery,
}

impl DeliveryType {
    /// Database representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Package => "package",
            Self::MorningPackage => "morning_package",
            Self::Delivery => "delivery",
            Self::MorningDelivery => "morning_delivery",
        }
    }

    /// Parse the database representation; unknown values map to `None`
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "package" => Self::Package,
            "morning_package" => Self::MorningPackage,
            "delivery" => Self::Delivery,
            "morning_delivery" => Self::MorningDelivery,
            _ => Self::None,
        }
    }
}

/// Countable (units, pieces) vs weight-based (continuous) items
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementType {
    /// Discrete units
    #[default]
    Countable,
    /// Continuous quantity sold by weight
    Weight,
}

impl MeasurementType {
    /// Database representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Countable => "countable",
            Self::Weight => "weight",
        }
    }

    /// Parse the database representation; unknown values map to `Countable`
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "weight" => Self::Weight,
            _ => Self::Countable,
        }
    }
}

/// Order lifecycle status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Accepted, not yet fulfilled
    #[default]
    Pending,
    /// Excluded from fulfillment without being canceled
    Ignored,
    /// Fulfilled
    Completed,
    /// Canceled
    Canceled,
}

impl OrderStatus {
    /// Database representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Ignored => "ignored",
            Self::Completed => "completed",
            Self::Canceled => "canceled",
        }
    }

    /// Parse the database representation; unknown values map to `Pending`
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "ignored" => Self::Ignored,
            "completed" => Self::Completed,
            "canceled" => Self::Canceled,
            _ => Self::Pending,
        }
    }
}

/// A customer of the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Database primary key
    pub id: i64,
    /// Display name, also the natural dedup key during import
    pub full_name: String,
    /// Email address
    pub email: Option<String>,
    /// Phone number
    pub phone: Option<String>,
    /// Street address; empty for customers outside the neighborhood
    pub address: Option<String>,
    /// Default delivery preference copied onto new orders
    pub default_delivery: DeliveryType,
    /// True when the customer lives inside the delivery neighborhood
    pub in_neighborhood: bool,
    /// Free-form JSON metadata
    pub metadata: Option<serde_json::Value>,
    /// Timestamp when the row was created
    pub created_at: NaiveDateTime,
}

/// Data for creating a new customer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCustomer {
    /// Display name
    pub full_name: String,
    /// Email address
    #[serde(default)]
    pub email: Option<String>,
    /// Phone number
    #[serde(default)]
    pub phone: Option<String>,
    /// Street address
    #[serde(default)]
    pub address: Option<String>,
    /// Default delivery preference
    #[serde(default)]
    pub default_delivery: DeliveryType,
    /// Neighborhood flag, defaults to true
    #[serde(default = "default_true")]
    pub in_neighborhood: bool,
    /// Free-form JSON metadata
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

/// Partial update payload for a customer
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerUpdate {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub default_delivery: Option<DeliveryType>,
    pub in_neighborhood: Option<bool>,
    pub metadata: Option<serde_json::Value>,
}

/// An inventory item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// Database primary key
    pub id: i64,
    /// Item name, the natural key used when imports reconcile items
    pub name: String,
    /// Description
    pub description: Option<String>,
    /// Purchase cost
    pub cost_price: f64,
    /// Sale price
    pub sale_price: f64,
    /// Stock on hand; fractional for weight-based items
    pub stock_quantity: f64,
    /// Countable vs weight-based
    pub measurement_type: MeasurementType,
    /// Free-form JSON metadata
    pub metadata: Option<serde_json::Value>,
    /// Timestamp when the row was created
    pub created_at: NaiveDateTime,
}

/// Data for creating a new item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewItem {
    /// Item name
    pub name: String,
    /// Description
    #[serde(default)]
    pub description: Option<String>,
    /// Purchase cost
    pub cost_price: f64,
    /// Sale price
    pub sale_price: f64,
    /// Stock on hand
    #[serde(default)]
    pub stock_quantity: f64,
    /// Countable vs weight-based
    #[serde(default)]
    pub measurement_type: MeasurementType,
    /// Free-form JSON metadata
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

/// Partial update payload for an item
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub cost_price: Option<f64>,
    pub sale_price: Option<f64>,
    pub stock_quantity: Option<f64>,
    pub measurement_type: Option<MeasurementType>,
    pub metadata: Option<serde_json::Value>,
}

/// A weekly order batch, keyed by ISO year-week
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekOrder {
    /// Database primary key
    pub id: i64,
    /// Year and week number, e.g. "2025-W36"
    pub week_key: String,
    /// Timestamp when the row was created
    pub created_at: NaiveDateTime,
}

/// Data for creating a new weekly batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWeekOrder {
    /// Year and week number, e.g. "2025-W36"
    pub week_key: String,
}

/// A customer order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Database primary key
    pub id: i64,
    /// Foreign key to customers table
    pub customer_id: i64,
    /// Delivery surcharge
    pub fee_price: f64,
    /// Timestamp when the order was placed
    pub order_date: NaiveDateTime,
    /// Lifecycle status
    pub status: OrderStatus,
    /// Delivery type captured at creation
    pub delivery_type: DeliveryType,
    /// Declared total amount
    pub total_amount: f64,
    /// Weekly batch this order belongs to
    pub week_order_id: Option<i64>,
    /// Free-form JSON metadata
    pub metadata: Option<serde_json::Value>,
}

/// Data for creating a new order
///
/// When `week_order_id` is absent the repository derives the batch from the
/// order date (ISO year-week), creating the `week_orders` row on first use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrder {
    /// Foreign key to customers table
    pub customer_id: i64,
    /// Delivery surcharge
    #[serde(default)]
    pub fee_price: f64,
    /// Lifecycle status
    #[serde(default)]
    pub status: OrderStatus,
    /// Delivery type
    #[serde(default)]
    pub delivery_type: DeliveryType,
    /// Declared total amount
    #[serde(default)]
    pub total_amount: f64,
    /// Explicit weekly batch; derived from the order date when absent
    #[serde(default)]
    pub week_order_id: Option<i64>,
    /// Free-form JSON metadata
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

/// Partial update payload for an order
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderUpdate {
    pub fee_price: Option<f64>,
    pub status: Option<OrderStatus>,
    pub delivery_type: Option<DeliveryType>,
    pub total_amount: Option<f64>,
    pub week_order_id: Option<i64>,
    pub metadata: Option<serde_json::Value>,
}

/// A line item linking an order to an inventory item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    /// Database primary key
    pub id: i64,
    /// Foreign key to orders table
    pub order_id: i64,
    /// Foreign key to items table
    pub item_id: i64,
    /// Ordered quantity; fractional for weight-based items
    pub quantity: f64,
    /// Unit price snapshot taken at order time, never a live reference
    /// to the item's current sale price
    pub unit_price: f64,
}

/// Data for creating a new order line item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrderItem {
    /// Foreign key to orders table
    pub order_id: i64,
    /// Foreign key to items table
    pub item_id: i64,
    /// Ordered quantity
    pub quantity: f64,
    /// Unit price snapshot
    pub unit_price: f64,
}

/// Partial update payload for an order line item
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderItemUpdate {
    pub quantity: Option<f64>,
    pub unit_price: Option<f64>,
}

const fn default_true() -> bool {
    true
}
