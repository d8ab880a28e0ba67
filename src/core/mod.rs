//! Core data structures.
//!
//! This module contains the foundational types used throughout the crate:
//! - Interned bucket names and the well-known vocabulary
//! - Buckets and their roles
//! - The host project model (plugins, tasks, settings)

pub mod bucket;
pub mod bucket_name;
pub mod conventions;
pub mod names;
pub mod plugin;
pub mod project;
pub mod settings;
pub mod task;

pub use bucket::{Bucket, Roles};
pub use bucket_name::BucketName;
pub use plugin::PluginSet;
pub use project::{AfterEvaluate, Project};
pub use settings::{ModSettings, SettingsError, Switch};
pub use task::{Task, TaskContainer, TaskKind};
