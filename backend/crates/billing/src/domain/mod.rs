//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (ChargeRecord)
//! - Domain value objects (ChargeRequest, ValidCharge)
//! - Domain services (secret and payload validation)
//! - The per-user serialization gate
//! - Repository traits (interfaces)

pub mod entities;
pub mod gate;
pub mod repository;
pub mod services;
pub mod value_objects;
