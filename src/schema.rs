//! Database schema definitions
//!
//! This module provides constants for table and column names used with rusqlite.
//! Keeping them in one place means the repository SQL never drifts from the
//! migration files silently.

/// Customers table schema
pub mod customers {
    /// Table name
    pub const TABLE: &str = "customers";
    /// Primary key column
    pub const ID: &str = "id";
    /// Customer display name column
    pub const FULL_NAME: &str = "full_name";
    /// Email address column
    pub const EMAIL: &str = "email";
    /// Phone number column
    pub const PHONE: &str = "phone";
    /// Street address column
    pub const ADDRESS: &str = "address";
    /// Default delivery preference column
    pub const DEFAULT_DELIVERY: &str = "default_delivery";
    /// Flag indicating the customer lives inside the neighborhood
    pub const IN_NEIGHBORHOOD: &str = "in_neighborhood";
    /// Free-form JSON metadata column
    pub const METADATA: &str = "metadata";
    /// Creation timestamp column
    pub const CREATED_AT: &str = "created_at";
}

/// Items table schema
pub mod items {
    /// Table name
    pub const TABLE: &str = "items";
    /// Primary key column
    pub const ID: &str = "id";
    /// Item name column
    pub const NAME: &str = "name";
    /// Item description column
    pub const DESCRIPTION: &str = "description";
    /// Purchase cost column
    pub const COST_PRICE: &str = "cost_price";
    /// Sale price column
    pub const SALE_PRICE: &str = "sale_price";
    /// Stock quantity column
    pub const STOCK_QUANTITY: &str = "stock_quantity";
    /// Countable vs weight-based classification column
    pub const MEASUREMENT_TYPE: &str = "measurement_type";
    /// Free-form JSON metadata column
    pub const METADATA: &str = "metadata";
    /// Creation timestamp column
    pub const CREATED_AT: &str = "created_at";
}

/// Weekly order batches table schema
pub mod week_orders {
    /// Table name
    pub const TABLE: &str = "week_orders";
    /// Primary key column
    pub const ID: &str = "id";
    /// ISO year-week key column ("YYYY-Www")
    pub const WEEK_KEY: &str = "week_key";
    /// Creation timestamp column
    pub const CREATED_AT: &str = "created_at";
}

/// Orders table schema
pub mod orders {
    /// Table name
    pub const TABLE: &str = "orders";
    /// Primary key column
    pub const ID: &str = "id";
    /// Foreign key to customers table
    pub const CUSTOMER_ID: &str = "customer_id";
    /// Delivery surcharge column
    pub const FEE_PRICE: &str = "fee_price";
    /// Order creation timestamp column
    pub const ORDER_DATE: &str = "order_date";
    /// Order lifecycle status column
    pub const STATUS: &str = "status";
    /// Delivery type column
    pub const DELIVERY_TYPE: &str = "delivery_type";
    /// Declared order total column
    pub const TOTAL_AMOUNT: &str = "total_amount";
    /// Foreign key to week_orders table
    pub const WEEK_ORDER_ID: &str = "week_order_id";
    /// Free-form JSON metadata column
    pub const METADATA: &str = "metadata";
}

/// Order line items table schema
pub mod order_items {
    /// Table name
    pub const TABLE: &str = "order_items";
    /// Primary key column
    pub const ID: &str = "id";
    /// Foreign key to orders table
    pub const ORDER_ID: &str = "order_id";
    /// Foreign key to items table
    pub const ITEM_ID: &str = "item_id";
    /// Ordered quantity column
    pub const QUANTITY: &str = "quantity";
    /// Unit price captured at order time
    pub const UNIT_PRICE: &str = "unit_price";
}
