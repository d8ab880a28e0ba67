//! High-level operations.
//!
//! Applying the plugin, running the providers after evaluation and
//! publishing the packaged output.

pub mod configure;
pub mod orchestrate;
pub mod remap;

pub use configure::ModPlugin;
pub use orchestrate::{DependencyManager, Provider, ProviderError, ProviderKind};
pub use remap::{configure_output, OutputMode};
