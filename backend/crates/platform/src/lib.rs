//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, constant-time comparison)
//! - Shared service secret handling (zeroized, redacted)
//! - Credential extraction from HTTP headers

pub mod client;
pub mod crypto;
pub mod secret;
