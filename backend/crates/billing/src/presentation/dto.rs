//! API DTOs (Data Transfer Objects)

use serde::Deserialize;

use crate::domain::value_objects::ChargeRequest;

/// Request for POST /billing/charge
///
/// Missing fields fall back to defaults and are then rejected by validation,
/// so the caller gets a reason naming the field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeRequestBody {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub product_id: String,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub date: Option<String>,
}

impl From<ChargeRequestBody> for ChargeRequest {
    fn from(body: ChargeRequestBody) -> Self {
        ChargeRequest {
            username: body.username,
            product_id: body.product_id,
            quantity: body.quantity,
            date: body.date,
        }
    }
}
