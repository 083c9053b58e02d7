//! Billing Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Charge entities, validation, the per-user gate, repository traits
//! - `application/` - Use cases and configuration
//! - `infra/` - File-backed journal store
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Consistency Model
//! - Every user has one append-only journal; each accepted charge is appended
//!   exactly once and is durable before the confirmation is returned
//! - Charges for the same user are serialized through a per-user gate;
//!   charges for different users never wait on each other
//! - Journals are replaced by atomic rename, so readers never observe a
//!   partially written journal

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::BillingConfig;
pub use domain::repository::CorruptJournalPolicy;
pub use error::{BillingError, BillingResult};
pub use infra::file_journal::FileJournalStore;
pub use presentation::router::billing_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
