//! cinedex application library
//!
//! This exposes the adapters, the catalog engine service, and the CLI surface
//! for testing and external usage. The core domain logic lives in
//! `cinedex-core`.

pub mod adapters;
pub mod cli;
pub mod services;
