//! Repository Traits
//!
//! Interfaces for journal persistence. Implementation is in infrastructure layer.

use crate::domain::entities::ChargeRecord;
use crate::domain::gate::GateGuard;
use crate::error::BillingResult;

/// What to do when a user's stored journal cannot be decoded on append
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CorruptJournalPolicy {
    /// Set the unreadable journal aside, report it, and continue from empty
    #[default]
    Recover,
    /// Fail the charge and leave the stored journal untouched
    Reject,
}

impl std::str::FromStr for CorruptJournalPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "recover" => Ok(CorruptJournalPolicy::Recover),
            "reject" => Ok(CorruptJournalPolicy::Reject),
            other => Err(format!(
                "unknown corrupt journal policy {other:?} (expected \"recover\" or \"reject\")"
            )),
        }
    }
}

/// Result of a committed append
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppendOutcome {
    /// Number of records in the journal after the append
    pub journal_len: usize,
    /// The previous journal was unreadable and was replaced
    pub recovered_from_corruption: bool,
}

/// Per-user append-only journal
#[trait_variant::make(JournalRepository: Send)]
pub trait LocalJournalRepository {
    /// Append `record` to the journal of `guard.key()`.
    ///
    /// Taking the guard by value keeps the user locked until the write-back
    /// has finished, even if the calling future is dropped midway.
    async fn append(&self, guard: GateGuard, record: ChargeRecord)
    -> BillingResult<AppendOutcome>;

    /// Committed records for `username`, oldest first. Empty if none.
    async fn read(&self, username: &str) -> BillingResult<Vec<ChargeRecord>>;
}
