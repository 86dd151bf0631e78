//! Application layer: services and use cases
//!
//! This layer wires configuration into the domain pipeline.

pub mod error;
pub mod services;

pub use error::ApplicationError;
