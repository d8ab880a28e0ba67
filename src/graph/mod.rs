//! The bucket graph.
//!
//! Buckets are wired through a [`BucketRegistry`] while the project is
//! configured, then frozen into a [`BucketGraph`] once evaluation ends.

pub mod builder;
pub mod entry;
pub mod errors;
pub mod finalized;
pub mod registry;

pub use builder::GraphBuilder;
pub use entry::{default_entries, PublishingMode, RemappedEntry};
pub use errors::GraphError;
pub use finalized::{BucketGraph, GraphSnapshot};
pub use registry::BucketRegistry;
