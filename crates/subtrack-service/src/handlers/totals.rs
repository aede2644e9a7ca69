//! Total cost handler.

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;

use subtrack_core::TotalQuery;

use super::parse_query;
use crate::error::ApiError;
use crate::state::AppState;

/// Sum of prices over the matching subscriptions.
///
/// Query: `start_period`, `end_period` (`MM-YYYY`, both exclusive),
/// `user_id`, `service_name`. All optional. The body is a bare JSON integer.
pub async fn total_cost(
    State(state): State<Arc<AppState>>,
    query: Result<Query<TotalQuery>, QueryRejection>,
) -> Result<Json<i64>, ApiError> {
    let query = parse_query(query)?;
    let total = state.totals.compute_total(&query).await?;

    tracing::debug!(
        start_period = ?query.start_period,
        end_period = ?query.end_period,
        user_id = ?query.user_id,
        service_name = ?query.service_name,
        total,
        "Total calculated"
    );

    Ok(Json(total))
}
