//! Infrastructure Layer
//!
//! Durable storage implementations of the domain repository traits.

pub mod file_journal;
