//! Domain layer for the Compass assessment engine
//!
//! This module contains the question catalog, conversation state, profile
//! types and the errors they raise. Nothing here performs I/O.

pub mod errors;
pub mod models;

// Re-export error types for convenient access
pub use errors::{AssessmentError, DomainResult};
