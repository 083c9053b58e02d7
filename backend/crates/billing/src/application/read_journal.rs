//! Read Journal Use Case

use crate::application::config::BillingConfig;
use crate::domain::entities::ChargeRecord;
use crate::domain::repository::JournalRepository;
use crate::domain::services::{authenticate, check_username_length};
use crate::error::{BillingError, BillingResult};
use std::sync::Arc;

/// Read Journal Use Case
///
/// Reads go straight to storage without the gate: writers publish by atomic
/// rename, so a reader always sees a complete committed journal.
pub struct ReadJournalUseCase<J>
where
    J: JournalRepository,
{
    journal_repo: Arc<J>,
    config: Arc<BillingConfig>,
}

impl<J> ReadJournalUseCase<J>
where
    J: JournalRepository,
{
    pub fn new(journal_repo: Arc<J>, config: Arc<BillingConfig>) -> Self {
        Self {
            journal_repo,
            config,
        }
    }

    pub async fn execute(
        &self,
        username: &str,
        supplied_secret: Option<&str>,
    ) -> BillingResult<Vec<ChargeRecord>> {
        authenticate(supplied_secret, &self.config.service_secret)?;

        if username.is_empty() {
            return Err(BillingError::BadPayload("username must not be empty".into()));
        }
        check_username_length(username)?;

        self.journal_repo.read(username).await
    }
}
