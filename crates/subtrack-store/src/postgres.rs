//! PostgreSQL storage backend.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, QueryBuilder};

use subtrack_core::{FilterSet, NewSubscription, Period, Predicate, Subscription, SubscriptionId};

use crate::error::{Result, StoreError};
use crate::schema::{self, col, SUBSCRIPTIONS};
use crate::Store;

/// How long to wait for a pooled connection before giving up.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// PostgreSQL-backed store.
///
/// Owns the connection pool. Clones share the pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

/// Row layout of the `subscriptions` table.
#[derive(sqlx::FromRow)]
struct SubscriptionRow {
    id: i64,
    service_name: String,
    price: i64,
    user_id: String,
    start_date: NaiveDate,
}

impl From<SubscriptionRow> for Subscription {
    fn from(row: SubscriptionRow) -> Self {
        Self {
            id: row.id,
            service_name: row.service_name,
            price: row.price,
            user_id: row.user_id,
            start_date: Period::from_date(row.start_date),
        }
    }
}

impl PgStore {
    /// Connect to the database at `url`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if no connection can be established.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect(url)
            .await?;

        tracing::info!(max_connections, "PostgreSQL pool connected");

        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    #[must_use]
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply the embedded schema migrations.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Migration` if a migration fails.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::info!("Database migrations applied");
        Ok(())
    }

    /// Close every pooled connection. Pending acquires fail afterwards.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("PostgreSQL pool closed");
    }

    fn select_columns() -> String {
        schema::all_columns().join(", ")
    }
}

/// Append `WHERE a AND b ...` for every predicate, with bound parameters.
fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filters: &FilterSet) {
    let mut separator = " WHERE ";
    for predicate in filters.predicates() {
        builder.push(separator);
        separator = " AND ";

        match predicate {
            Predicate::StartedAfter(date) => {
                builder.push(col::START_DATE).push(" > ").push_bind(*date);
            }
            Predicate::StartedBefore(date) => {
                builder.push(col::START_DATE).push(" < ").push_bind(*date);
            }
            Predicate::UserIdEquals(user_id) => {
                builder.push(col::USER_ID).push(" = ").push_bind(user_id.clone());
            }
            Predicate::ServiceNameEquals(name) => {
                builder.push(col::SERVICE_NAME).push(" = ").push_bind(name.clone());
            }
        }
    }
}

/// The aggregate query for a filter set, without executing it.
fn sum_query(filters: &FilterSet) -> QueryBuilder<'static, Postgres> {
    // SUM(BIGINT) is NUMERIC in PostgreSQL; cast back so it decodes as i64.
    let mut builder = QueryBuilder::new(format!(
        "SELECT SUM({})::BIGINT FROM {SUBSCRIPTIONS}",
        col::PRICE
    ));
    push_filters(&mut builder, filters);
    builder
}

#[async_trait]
impl Store for PgStore {
    async fn insert(&self, new: &NewSubscription) -> Result<Subscription> {
        let sql = format!(
            "INSERT INTO {SUBSCRIPTIONS} ({}, {}, {}, {}) VALUES ($1, $2, $3, $4) RETURNING {}",
            col::SERVICE_NAME,
            col::PRICE,
            col::USER_ID,
            col::START_DATE,
            Self::select_columns()
        );

        let row: SubscriptionRow = sqlx::query_as(&sql)
            .bind(&new.service_name)
            .bind(new.price)
            .bind(&new.user_id)
            .bind(new.start_date.first_day())
            .fetch_one(&self.pool)
            .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: SubscriptionId) -> Result<Option<Subscription>> {
        let sql = format!(
            "SELECT {} FROM {SUBSCRIPTIONS} WHERE {} = $1",
            Self::select_columns(),
            col::ID
        );

        let row: Option<SubscriptionRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    async fn find_all(&self, limit: usize, offset: usize) -> Result<Vec<Subscription>> {
        let sql = format!(
            "SELECT {} FROM {SUBSCRIPTIONS} ORDER BY {} LIMIT $1 OFFSET $2",
            Self::select_columns(),
            col::ID
        );

        let rows: Vec<SubscriptionRow> = sqlx::query_as(&sql)
            .bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .bind(i64::try_from(offset).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn replace(&self, id: SubscriptionId, new: &NewSubscription) -> Result<Subscription> {
        let sql = format!(
            "UPDATE {SUBSCRIPTIONS} SET {} = $1, {} = $2, {} = $3, {} = $4 WHERE {} = $5 RETURNING {}",
            col::SERVICE_NAME,
            col::PRICE,
            col::USER_ID,
            col::START_DATE,
            col::ID,
            Self::select_columns()
        );

        let row: Option<SubscriptionRow> = sqlx::query_as(&sql)
            .bind(&new.service_name)
            .bind(new.price)
            .bind(&new.user_id)
            .bind(new.start_date.first_day())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Into::into)
            .ok_or_else(|| StoreError::subscription_not_found(id))
    }

    async fn delete_by_id(&self, id: SubscriptionId) -> Result<()> {
        let sql = format!("DELETE FROM {SUBSCRIPTIONS} WHERE {} = $1", col::ID);

        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::subscription_not_found(id));
        }
        Ok(())
    }

    async fn aggregate_sum(&self, filters: &FilterSet) -> Result<Option<i64>> {
        let mut query = sum_query(filters);
        tracing::debug!(sql = %query.sql(), predicates = filters.predicates().len(), "Running aggregate sum");

        let total: Option<i64> = query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use subtrack_core::build_filters;

    #[test]
    fn sum_query_without_filters_has_no_where_clause() {
        let query = sum_query(&FilterSet::new());
        assert_eq!(
            query.sql(),
            "SELECT SUM(price)::BIGINT FROM subscriptions"
        );
    }

    #[test]
    fn sum_query_binds_every_filter() {
        let filters = build_filters(
            Some("01-2024"),
            Some("03-2024"),
            Some("60601fee-2bf1-4721-ae6f-7636e79a0cba"),
            Some("Netflix"),
        )
        .unwrap();

        let query = sum_query(&filters);
        assert_eq!(
            query.sql(),
            "SELECT SUM(price)::BIGINT FROM subscriptions \
             WHERE start_date > $1 AND start_date < $2 AND user_id = $3 AND service_name = $4"
        );
    }

    #[test]
    fn sum_query_never_inlines_values() {
        let filters = build_filters(None, None, None, Some("x' OR '1'='1")).unwrap();
        let query = sum_query(&filters);
        assert!(!query.sql().contains("OR"));
        assert!(query.sql().ends_with("service_name = $1"));
    }
}
