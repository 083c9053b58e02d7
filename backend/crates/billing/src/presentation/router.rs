//! Billing Router

use crate::application::config::BillingConfig;
use crate::domain::gate::KeyGate;
use crate::domain::repository::JournalRepository;
use crate::infra::file_journal::FileJournalStore;
use crate::presentation::handlers::{self, BillingAppState};
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

/// Create the billing router backed by per-user journal files under
/// `config.storage_root`
pub fn billing_router(config: BillingConfig) -> Router {
    let store = FileJournalStore::new(&config.storage_root, config.corrupt_journal_policy);
    billing_router_generic(store, config)
}

/// Create a billing router for any journal implementation
pub fn billing_router_generic<J>(repo: J, config: BillingConfig) -> Router
where
    J: JournalRepository + Clone + Send + Sync + 'static,
{
    let state = BillingAppState {
        repo: Arc::new(repo),
        gate: Arc::new(KeyGate::new()),
        config: Arc::new(config),
    };

    Router::new()
        .route("/charge", post(handlers::charge::<J>))
        .route("/journal/{username}", get(handlers::read_journal::<J>))
        .with_state(state)
}
