//! # Folio Core
//!
//! The domain layer of the Folio blog backend.
//! This crate contains pure business logic with zero infrastructure dependencies.
//! Time is always passed in explicitly so every rule here is deterministic.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::DomainError;
