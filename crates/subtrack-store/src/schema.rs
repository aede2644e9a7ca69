//! Relational schema names.
//!
//! The table itself is created by the embedded migrations under `migrations/`.

/// Table holding one row per subscription.
pub const SUBSCRIPTIONS: &str = "subscriptions";

/// Column names of the `subscriptions` table.
pub mod col {
    /// Primary key, `BIGSERIAL`.
    pub const ID: &str = "id";

    /// Service name, `TEXT`.
    pub const SERVICE_NAME: &str = "service_name";

    /// Price in the smallest currency unit, `BIGINT`.
    pub const PRICE: &str = "price";

    /// Owning user, `TEXT`.
    pub const USER_ID: &str = "user_id";

    /// First day of the starting month, `DATE`.
    pub const START_DATE: &str = "start_date";
}

/// Returns every column in select order.
#[must_use]
pub fn all_columns() -> Vec<&'static str> {
    vec![
        col::ID,
        col::SERVICE_NAME,
        col::PRICE,
        col::USER_ID,
        col::START_DATE,
    ]
}
