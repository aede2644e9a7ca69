//! Subscription records.
//!
//! [`Subscription`] is a stored row; [`NewSubscription`] is the payload used
//! to insert or fully replace one.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SubscriptionError};
use crate::period::Period;

/// Store-assigned identity of a subscription.
pub type SubscriptionId = i64;

/// A stored subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    /// Store-assigned identifier. Unique and never reused.
    pub id: SubscriptionId,

    /// Name of the subscribed service.
    pub service_name: String,

    /// Price in the smallest currency unit.
    pub price: i64,

    /// Owning user (UUID text).
    pub user_id: String,

    /// Month the subscription started.
    pub start_date: Period,
}

impl Subscription {
    /// Attach a store-assigned id to a new subscription payload.
    #[must_use]
    pub fn from_new(id: SubscriptionId, new: NewSubscription) -> Self {
        Self {
            id,
            service_name: new.service_name,
            price: new.price,
            user_id: new.user_id,
            start_date: new.start_date,
        }
    }
}

/// Insert / replace payload for a subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSubscription {
    /// Name of the subscribed service.
    pub service_name: String,

    /// Price in the smallest currency unit.
    pub price: i64,

    /// Owning user (UUID text).
    pub user_id: String,

    /// Month the subscription started (`MM-YYYY`).
    pub start_date: Period,
}

impl NewSubscription {
    /// Check the payload against the domain contract.
    ///
    /// The store accepts anything; callers at the boundary must run this
    /// before handing the payload over.
    ///
    /// # Errors
    ///
    /// - `SubscriptionError::EmptyServiceName` if the name is blank.
    /// - `SubscriptionError::NegativePrice` if the price is below zero.
    /// - `SubscriptionError::InvalidUserId` if the user id is not a UUID.
    pub fn validate(&self) -> Result<()> {
        if self.service_name.trim().is_empty() {
            return Err(SubscriptionError::EmptyServiceName);
        }
        if self.price < 0 {
            return Err(SubscriptionError::NegativePrice { price: self.price });
        }
        if uuid::Uuid::parse_str(&self.user_id).is_err() {
            return Err(SubscriptionError::InvalidUserId {
                value: self.user_id.clone(),
            });
        }
        Ok(())
    }
}
