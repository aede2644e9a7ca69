//! Core types for subtrack.
//!
//! This crate provides the foundational types used throughout the subtrack service:
//!
//! - **Periods**: `Period`, the `MM-YYYY` month/year value used for start dates and filters
//! - **Subscriptions**: `Subscription`, `NewSubscription`
//! - **Filters**: `Predicate`, `FilterSet`, `TotalQuery`
//!
//! # Prices
//!
//! Prices are whole numbers in the smallest currency unit and are stored as
//! `i64`. There is no fractional component anywhere in the pipeline.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod filter;
pub mod period;
pub mod subscription;

pub use error::{Result, SubscriptionError};
pub use filter::{build_filters, FilterSet, Predicate, TotalQuery};
pub use period::{Period, PeriodError};
pub use subscription::{NewSubscription, Subscription, SubscriptionId};
