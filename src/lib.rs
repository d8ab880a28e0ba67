//! modweave - dependency bucket wiring for mod development builds
//!
//! This crate wires a mod project's dependency buckets into the host build
//! tool's classpaths and outgoing variants, runs the one-shot preparation
//! providers once the project model is complete, and configures compile-time
//! code generation for every active language toolchain.

pub mod core;
pub mod graph;
pub mod ops;
pub mod toolchain;
pub mod util;

/// Test doubles for providers and invokers.
#[cfg(test)]
pub mod test_support;

/// Identifier this plugin is applied under.
pub const PLUGIN_ID: &str = "modweave";

pub use core::{Bucket, BucketName, ModSettings, Project, Roles};
pub use graph::{BucketGraph, BucketRegistry, GraphBuilder, GraphError, RemappedEntry};
pub use ops::{DependencyManager, ModPlugin, Provider, ProviderError, ProviderKind};
pub use toolchain::{CodegenInvoker, InvokerSet, Toolchain};
