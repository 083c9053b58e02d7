//! Application Configuration
//!
//! Configuration for the billing application layer. Values come from the
//! process environment; see the `api` binary.

use std::path::PathBuf;

pub use crate::domain::repository::CorruptJournalPolicy;
pub use platform::secret::SharedSecret;

/// Default storage root for per-user journals
pub const DEFAULT_STORAGE_ROOT: &str = "./data/billing";

/// Billing application configuration
#[derive(Debug, Clone)]
pub struct BillingConfig {
    /// Secret every caller must present
    pub service_secret: SharedSecret,
    /// Header the secret is read from
    pub secret_header: String,
    /// Directory holding one journal file per user
    pub storage_root: PathBuf,
    /// Behaviour when an existing journal cannot be decoded
    pub corrupt_journal_policy: CorruptJournalPolicy,
}

impl BillingConfig {
    pub fn new(service_secret: SharedSecret, storage_root: impl Into<PathBuf>) -> Self {
        Self {
            service_secret,
            secret_header: platform::client::SERVICE_SECRET_HEADER.to_string(),
            storage_root: storage_root.into(),
            corrupt_journal_policy: CorruptJournalPolicy::default(),
        }
    }

    pub fn with_corrupt_journal_policy(mut self, policy: CorruptJournalPolicy) -> Self {
        self.corrupt_journal_policy = policy;
        self
    }
}
