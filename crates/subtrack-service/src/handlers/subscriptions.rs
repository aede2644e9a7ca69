//! Subscription record handlers.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use subtrack_core::{NewSubscription, Subscription, SubscriptionId};

use super::parse_query;
use crate::error::ApiError;
use crate::state::AppState;

/// Upper bound on `limit` for list requests.
const MAX_LIST_LIMIT: usize = 1000;

/// List query parameters.
#[derive(Debug, Deserialize)]
pub struct ListSubscriptionsQuery {
    /// Maximum number of records to return.
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Number of records to skip.
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    100
}

fn parse_body(
    payload: Result<Json<NewSubscription>, JsonRejection>,
) -> Result<NewSubscription, ApiError> {
    let Json(new) = payload.map_err(|e| {
        tracing::warn!(error = %e, "Invalid JSON");
        ApiError::BadRequest(e.body_text())
    })?;

    new.validate().map_err(|e| {
        tracing::warn!(error = %e, "Validation error");
        ApiError::from(e)
    })?;

    Ok(new)
}

fn parse_id(id: Result<Path<SubscriptionId>, PathRejection>) -> Result<SubscriptionId, ApiError> {
    let Path(id) = id.map_err(|e| {
        tracing::warn!(error = %e, "Invalid subscription id");
        ApiError::BadRequest(e.body_text())
    })?;
    Ok(id)
}

/// Create a subscription.
pub async fn create_subscription(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewSubscription>, JsonRejection>,
) -> Result<(StatusCode, Json<Subscription>), ApiError> {
    let new = parse_body(payload)?;

    let created = state.store.insert(&new).await?;

    tracing::info!(
        id = created.id,
        user_id = %created.user_id,
        service_name = %created.service_name,
        "Subscription created"
    );

    Ok((StatusCode::CREATED, Json(created)))
}

/// List subscriptions ordered by id.
pub async fn list_subscriptions(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListSubscriptionsQuery>, QueryRejection>,
) -> Result<Json<Vec<Subscription>>, ApiError> {
    let query = parse_query(query)?;
    let limit = query.limit.min(MAX_LIST_LIMIT);
    let subscriptions = state.store.find_all(limit, query.offset).await?;

    Ok(Json(subscriptions))
}

/// Get a subscription by id.
pub async fn get_subscription(
    State(state): State<Arc<AppState>>,
    id: Result<Path<SubscriptionId>, PathRejection>,
) -> Result<Json<Subscription>, ApiError> {
    let id = parse_id(id)?;

    let subscription = state
        .store
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("subscription not found: {id}")))?;

    Ok(Json(subscription))
}

/// Replace every field of a subscription.
pub async fn update_subscription(
    State(state): State<Arc<AppState>>,
    id: Result<Path<SubscriptionId>, PathRejection>,
    payload: Result<Json<NewSubscription>, JsonRejection>,
) -> Result<Json<Subscription>, ApiError> {
    let id = parse_id(id)?;
    let new = parse_body(payload)?;

    let updated = state.store.replace(id, &new).await?;

    tracing::info!(id, "Subscription replaced");

    Ok(Json(updated))
}

/// Delete a subscription.
pub async fn delete_subscription(
    State(state): State<Arc<AppState>>,
    id: Result<Path<SubscriptionId>, PathRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = parse_id(id)?;

    state.store.delete_by_id(id).await?;

    tracing::info!(id, "Subscription deleted");

    Ok(Json(serde_json::json!({ "deleted": true })))
}
