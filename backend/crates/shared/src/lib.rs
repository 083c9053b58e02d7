//! Shared Kernel - Domain-crossing minimal core
//!
//! The vocabulary every service crate agrees on:
//! - [`error::app_error::AppError`] and the [`error::app_error::AppResult`] alias
//! - [`error::kind::ErrorKind`], the HTTP-facing error classification
//! - (behind `axum`) the RFC 7807 response rendering
//!
//! Only things with the same meaning in every domain belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
