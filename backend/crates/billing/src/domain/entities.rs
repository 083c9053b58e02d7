//! Domain Entities
//!
//! Core business entities for the billing domain.

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::ValidCharge;

/// Outcome recorded for a charge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChargeStatus {
    Charged,
}

/// ChargeRecord entity - one committed line of a user's journal.
///
/// This is also the confirmation body returned to the caller, so the field
/// names are part of the wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeRecord {
    pub status: ChargeStatus,
    pub user: String,
    pub product: String,
    pub quantity: u32,
    /// ISO-8601, UTC
    pub date: String,
}

impl ChargeRecord {
    /// Derive the record for an accepted charge
    pub fn charged(charge: &ValidCharge) -> Self {
        Self {
            status: ChargeStatus::Charged,
            user: charge.username().to_string(),
            product: charge.product_id().to_string(),
            quantity: charge.quantity(),
            date: charge.date().to_rfc3339_opts(SecondsFormat::AutoSi, true),
        }
    }
}
