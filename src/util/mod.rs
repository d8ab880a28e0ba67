//! Shared utilities

pub mod config;
pub mod diagnostic;
pub mod logging;

pub use config::Config;
pub use diagnostic::{Diagnostic, OrderingViolationError};
