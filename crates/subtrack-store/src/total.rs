//! Total cost calculation.
//!
//! Build filters, run one aggregate query, map an empty match to zero.

use std::sync::Arc;

use subtrack_core::{PeriodError, TotalQuery};

use crate::error::StoreError;
use crate::Store;

/// Errors from [`TotalCalculator::compute_total`].
///
/// Callers map `InvalidPeriod` to a client error and `Backend` to a server error.
#[derive(Debug, thiserror::Error)]
pub enum TotalError {
    /// A period parameter is not `MM-YYYY`. No query was issued.
    #[error(transparent)]
    InvalidPeriod(#[from] PeriodError),

    /// The store could not run the aggregate query.
    #[error("backend failure: {0}")]
    Backend(#[from] StoreError),
}

/// Computes the summed price of all subscriptions matching a query.
///
/// Stateless apart from the injected store handle; safe to share between
/// concurrent requests.
#[derive(Clone)]
pub struct TotalCalculator {
    store: Arc<dyn Store>,
}

impl TotalCalculator {
    /// Create a calculator over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Sum of `price` over every subscription matching `query`.
    ///
    /// Issues exactly one store query, or none if the filters are invalid.
    /// Prices are not sign-checked here; non-negative prices are enforced
    /// when records are written.
    ///
    /// # Errors
    ///
    /// - `TotalError::InvalidPeriod` if a period parameter is malformed.
    /// - `TotalError::Backend` if the store query fails.
    pub async fn compute_total(&self, query: &TotalQuery) -> Result<i64, TotalError> {
        let filters = query.filters()?;

        let sum = self.store.aggregate_sum(&filters).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to calculate total");
            e
        })?;

        Ok(sum.unwrap_or(0))
    }
}
