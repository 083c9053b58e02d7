//! Domain Value Objects
//!
//! Immutable value types for the billing domain.

use chrono::{DateTime, Utc};

/// Raw charge request as received from the transport layer.
///
/// Nothing here is trusted yet; see [`crate::domain::services::validate_charge`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargeRequest {
    pub username: String,
    pub product_id: String,
    pub quantity: i64,
    /// ISO-8601 timestamp of when the charge was requested
    pub date: Option<String>,
}

/// A charge that passed validation.
///
/// Fields are private so the only way to obtain one is through the validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidCharge {
    username: String,
    product_id: String,
    quantity: u32,
    date: DateTime<Utc>,
}

impl ValidCharge {
    pub(crate) fn new(
        username: String,
        product_id: String,
        quantity: u32,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            username,
            product_id,
            quantity,
            date,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }
}
