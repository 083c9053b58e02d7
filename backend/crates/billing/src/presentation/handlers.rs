//! HTTP Handlers

use crate::application::charge::ChargeUseCase;
use crate::application::config::BillingConfig;
use crate::application::read_journal::ReadJournalUseCase;
use crate::domain::entities::ChargeRecord;
use crate::domain::gate::KeyGate;
use crate::domain::repository::JournalRepository;
use crate::domain::services::authenticate;
use crate::error::{BillingError, BillingResult};
use crate::presentation::dto::ChargeRequestBody;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use platform::client::extract_secret_header;
use std::sync::Arc;

/// Shared state for billing handlers
#[derive(Clone)]
pub struct BillingAppState<J>
where
    J: JournalRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<J>,
    pub gate: Arc<KeyGate>,
    pub config: Arc<BillingConfig>,
}

/// POST /billing/charge
pub async fn charge<J>(
    State(state): State<BillingAppState<J>>,
    headers: HeaderMap,
    body: Result<Json<ChargeRequestBody>, JsonRejection>,
) -> BillingResult<Json<ChargeRecord>>
where
    J: JournalRepository + Clone + Send + Sync + 'static,
{
    let secret = extract_secret_header(&headers, &state.config.secret_header);

    // The secret outranks the body: an unparseable body from an
    // unauthenticated caller is still a 401.
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => {
            authenticate(secret.as_deref(), &state.config.service_secret)?;
            return Err(BillingError::BadPayload(rejection.body_text()));
        }
    };

    let use_case = ChargeUseCase::new(
        state.repo.clone(),
        state.gate.clone(),
        state.config.clone(),
    );

    let output = use_case.execute(body.into(), secret.as_deref()).await?;

    Ok(Json(output.record))
}

/// GET /billing/journal/{username}
pub async fn read_journal<J>(
    State(state): State<BillingAppState<J>>,
    headers: HeaderMap,
    Path(username): Path<String>,
) -> BillingResult<Json<Vec<ChargeRecord>>>
where
    J: JournalRepository + Clone + Send + Sync + 'static,
{
    let secret = extract_secret_header(&headers, &state.config.secret_header);

    let use_case = ReadJournalUseCase::new(state.repo.clone(), state.config.clone());

    let records = use_case.execute(&username, secret.as_deref()).await?;

    Ok(Json(records))
}
