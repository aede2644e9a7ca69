//! HTTP request handlers.

use axum::extract::rejection::QueryRejection;
use axum::extract::Query;

use crate::error::ApiError;

pub mod health;
pub mod subscriptions;
pub mod totals;

/// Unwrap a query-string extraction, answering malformed ones with the JSON error body.
fn parse_query<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, ApiError> {
    let Query(query) = query.map_err(|e| {
        tracing::warn!(error = %e, "Invalid query string");
        ApiError::BadRequest(e.body_text())
    })?;
    Ok(query)
}
