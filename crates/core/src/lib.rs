//! cinedex core - Pure domain logic with no I/O dependencies
//!
//! This crate contains the business logic, domain types, and ports (interfaces)
//! for the cinedex catalog engine. It has no dependencies on HTTP clients,
//! filesystem operations, or terminals - those are handled by adapters.

pub mod app;
pub mod domain;
pub mod error;
pub mod ports;

// Re-exports for ergonomics
pub use domain::*;
pub use error::*;
