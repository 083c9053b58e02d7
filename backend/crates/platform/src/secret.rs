//! Shared Secret
//!
//! Service-to-service credential compared against a caller-supplied header.
//!
//! ## Security Features
//! - Zeroized on drop, never printed by `Debug`
//! - Verification compares SHA-256 digests in constant time, so neither the
//!   content nor the length of the expected secret leaks through timing

use std::fmt;

use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::{constant_time_eq, sha256};

/// Error when constructing a [`SharedSecret`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SharedSecretError {
    #[error("Shared secret must not be empty")]
    Empty,
}

/// Process-wide shared secret
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret(String);

impl SharedSecret {
    /// Wrap a configured secret. Empty secrets are refused, otherwise an
    /// absent header could never be told apart from a matching one.
    pub fn new(raw: impl Into<String>) -> Result<Self, SharedSecretError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(SharedSecretError::Empty);
        }
        Ok(Self(raw))
    }

    /// Exact, case-sensitive match against a caller-supplied value
    pub fn verify(&self, supplied: &str) -> bool {
        constant_time_eq(&sha256(self.0.as_bytes()), &sha256(supplied.as_bytes()))
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedSecret([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_secret_rejected() {
        assert_eq!(SharedSecret::new("").unwrap_err(), SharedSecretError::Empty);
    }

    #[test]
    fn test_verify_exact_match() {
        let secret = SharedSecret::new("s3cr3t").unwrap();
        assert!(secret.verify("s3cr3t"));
        assert!(!secret.verify("S3CR3T"));
        assert!(!secret.verify("s3cr3t "));
        assert!(!secret.verify(""));
    }

    #[test]
    fn test_debug_is_redacted() {
        let secret = SharedSecret::new("hunter2").unwrap();
        let rendered = format!("{:?}", secret);
        assert!(!rendered.contains("hunter2"));
    }
}
