//! Error types for subtrack domain validation.

/// Result type for domain operations.
pub type Result<T> = std::result::Result<T, SubscriptionError>;

/// Errors raised when a subscription payload violates the domain contract.
#[derive(Debug, thiserror::Error)]
pub enum SubscriptionError {
    /// Service name is empty or whitespace.
    #[error("service name must not be empty")]
    EmptyServiceName,

    /// Price below zero.
    #[error("price must not be negative: {price}")]
    NegativePrice {
        /// The rejected price.
        price: i64,
    },

    /// User identifier is not a UUID.
    #[error("invalid user id: {value}")]
    InvalidUserId {
        /// The rejected identifier.
        value: String,
    },
}
