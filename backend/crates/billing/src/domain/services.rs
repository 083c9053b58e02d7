//! Domain Services
//!
//! Pure checks run before a charge may touch the journal. No I/O.

use chrono::{DateTime, Utc};
use platform::secret::SharedSecret;

use crate::domain::value_objects::{ChargeRequest, ValidCharge};
use crate::error::{BillingError, BillingResult};

/// Longest accepted username, in bytes. Any accepted username maps to a
/// journal file name within the file system limit.
pub const USERNAME_MAX_BYTES: usize = 256;

/// Check the caller-supplied secret against the configured one.
///
/// An absent or empty header is treated the same as a wrong one.
pub fn authenticate(supplied: Option<&str>, expected: &SharedSecret) -> BillingResult<()> {
    match supplied {
        Some(value) if !value.is_empty() && expected.verify(value) => Ok(()),
        _ => Err(BillingError::Unauthorized),
    }
}

/// Validate payload shape and normalize the date to UTC.
pub fn validate_charge(request: ChargeRequest) -> BillingResult<ValidCharge> {
    let ChargeRequest {
        username,
        product_id,
        quantity,
        date,
    } = request;

    if username.is_empty() {
        return Err(BillingError::BadPayload("username must not be empty".into()));
    }
    check_username_length(&username)?;
    if product_id.is_empty() {
        return Err(BillingError::BadPayload(
            "productId must not be empty".into(),
        ));
    }
    if quantity <= 0 {
        return Err(BillingError::BadPayload(format!(
            "quantity must be positive (got {quantity})"
        )));
    }
    let quantity = u32::try_from(quantity).map_err(|_| {
        BillingError::BadPayload(format!("quantity must not exceed {}", u32::MAX))
    })?;

    let date = date.ok_or_else(|| BillingError::BadPayload("date is required".into()))?;
    let date = parse_date(&date)?;

    Ok(ValidCharge::new(username, product_id, quantity, date))
}

/// Usernames longer than [`USERNAME_MAX_BYTES`] are rejected.
pub fn check_username_length(username: &str) -> BillingResult<()> {
    if username.len() > USERNAME_MAX_BYTES {
        return Err(BillingError::BadPayload(format!(
            "username must not exceed {USERNAME_MAX_BYTES} bytes"
        )));
    }
    Ok(())
}

fn parse_date(raw: &str) -> BillingResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| BillingError::BadPayload(format!("date is not an ISO-8601 timestamp: {e}")))
}
