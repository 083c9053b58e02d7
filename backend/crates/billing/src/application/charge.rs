//! Charge Use Case
//!
//! Received → Authenticated → Validated → Serialized → Persisted → Responded.
//! Auth and payload failures end in `Rejected` before the journal is touched;
//! a storage failure ends in `Failed` and nothing is reported as charged.

use crate::application::config::BillingConfig;
use crate::domain::entities::ChargeRecord;
use crate::domain::gate::KeyGate;
use crate::domain::repository::JournalRepository;
use crate::domain::services::{authenticate, validate_charge};
use crate::domain::value_objects::ChargeRequest;
use crate::error::BillingResult;
use std::sync::Arc;

/// Output DTO for a committed charge
#[derive(Debug, Clone)]
pub struct ChargeOutput {
    pub record: ChargeRecord,
    pub journal_len: usize,
    /// The user's previous journal was unreadable and was set aside
    pub recovered_from_corruption: bool,
}

/// Charge Use Case
pub struct ChargeUseCase<J>
where
    J: JournalRepository,
{
    journal_repo: Arc<J>,
    gate: Arc<KeyGate>,
    config: Arc<BillingConfig>,
}

impl<J> ChargeUseCase<J>
where
    J: JournalRepository,
{
    pub fn new(journal_repo: Arc<J>, gate: Arc<KeyGate>, config: Arc<BillingConfig>) -> Self {
        Self {
            journal_repo,
            gate,
            config,
        }
    }

    pub async fn execute(
        &self,
        request: ChargeRequest,
        supplied_secret: Option<&str>,
    ) -> BillingResult<ChargeOutput> {
        authenticate(supplied_secret, &self.config.service_secret)?;

        let charge = validate_charge(request)?;
        let record = ChargeRecord::charged(&charge);

        // Dropping this future while waiting here leaves no trace.
        let guard = self.gate.acquire(charge.username()).await;

        let outcome = self.journal_repo.append(guard, record.clone()).await?;

        tracing::info!(
            user = %record.user,
            product = %record.product,
            quantity = record.quantity,
            journal_len = outcome.journal_len,
            "Charge committed"
        );

        Ok(ChargeOutput {
            record,
            journal_len: outcome.journal_len,
            recovered_from_corruption: outcome.recovered_from_corruption,
        })
    }
}
