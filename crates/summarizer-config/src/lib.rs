//! # Summarizer Config
//!
//! Configuration management for the summarizer pipeline. Values are validated
//! once at load time; invalid values fail the load instead of being clamped.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
