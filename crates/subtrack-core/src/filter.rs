//! Filter construction for aggregate queries.
//!
//! Loosely-typed query parameters are turned into a [`FilterSet`]: a
//! conjunction of [`Predicate`]s that every store applies the same way.
//!
//! # Boundaries
//!
//! Both period bounds are exclusive. A subscription that starts in exactly
//! the `start_period` month does not pass the lower bound, and one that
//! starts in exactly the `end_period` month does not pass the upper bound.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::period::{Period, PeriodError};
use crate::subscription::Subscription;

/// A single filter condition on a subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// `start_date > date`.
    StartedAfter(NaiveDate),

    /// `start_date < date`.
    StartedBefore(NaiveDate),

    /// `user_id = value`, exact match.
    UserIdEquals(String),

    /// `service_name = value`, exact and case-sensitive.
    ServiceNameEquals(String),
}

impl Predicate {
    /// Evaluate the predicate against a stored record.
    #[must_use]
    pub fn matches(&self, subscription: &Subscription) -> bool {
        match self {
            Self::StartedAfter(date) => subscription.start_date.first_day() > *date,
            Self::StartedBefore(date) => subscription.start_date.first_day() < *date,
            Self::UserIdEquals(user_id) => subscription.user_id == *user_id,
            Self::ServiceNameEquals(name) => subscription.service_name == *name,
        }
    }
}

/// A conjunction of predicates. Empty means no restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    predicates: Vec<Predicate>,
}

impl FilterSet {
    /// A filter set with no restriction.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a predicate to the conjunction.
    #[must_use]
    pub fn and(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// The predicates, in the order they were added.
    #[must_use]
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Whether the set places no restriction at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Whether a record satisfies every predicate.
    #[must_use]
    pub fn matches(&self, subscription: &Subscription) -> bool {
        self.predicates.iter().all(|p| p.matches(subscription))
    }
}

/// Raw parameters of a total-cost query, as they arrive in a query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TotalQuery {
    /// Exclusive lower bound, `MM-YYYY`.
    #[serde(default)]
    pub start_period: Option<String>,

    /// Exclusive upper bound, `MM-YYYY`.
    #[serde(default)]
    pub end_period: Option<String>,

    /// Owning user to restrict to.
    #[serde(default)]
    pub user_id: Option<String>,

    /// Service name to restrict to.
    #[serde(default)]
    pub service_name: Option<String>,
}

impl TotalQuery {
    /// Build the filter set for this query.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError` if either period is present, non-empty and not `MM-YYYY`.
    pub fn filters(&self) -> Result<FilterSet, PeriodError> {
        build_filters(
            self.start_period.as_deref(),
            self.end_period.as_deref(),
            self.user_id.as_deref(),
            self.service_name.as_deref(),
        )
    }
}

/// Translate optional parameters into a conjunction of predicates.
///
/// Absent and empty parameters add nothing. User id and service name are
/// matched verbatim; no syntax checks happen here.
///
/// # Errors
///
/// Returns `PeriodError` if a supplied period is not `MM-YYYY`.
pub fn build_filters(
    start_period: Option<&str>,
    end_period: Option<&str>,
    user_id: Option<&str>,
    service_name: Option<&str>,
) -> Result<FilterSet, PeriodError> {
    let mut filters = FilterSet::new();

    if let Some(start) = non_empty(start_period) {
        let start: Period = start.parse()?;
        filters = filters.and(Predicate::StartedAfter(start.first_day()));
    }

    if let Some(end) = non_empty(end_period) {
        let end: Period = end.parse()?;
        filters = filters.and(Predicate::StartedBefore(end.first_day()));
    }

    if let Some(user_id) = non_empty(user_id) {
        filters = filters.and(Predicate::UserIdEquals(user_id.to_string()));
    }

    if let Some(name) = non_empty(service_name) {
        filters = filters.and(Predicate::ServiceNameEquals(name.to_string()));
    }

    Ok(filters)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
