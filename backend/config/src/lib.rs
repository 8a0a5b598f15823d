//! CamGate Configuration
//!
//! Process-wide settings resolved once at startup from environment variables.
//! The admission backend selection and window length are immutable for the
//! process lifetime.

pub mod env;
pub mod schema;
pub mod validation;

pub use schema::{AdmissionBackendKind, Config};
pub use validation::validate;
