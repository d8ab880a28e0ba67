//! Remapped-entry table.
//!
//! Each entry is one user-facing mod dependency role: a source bucket the
//! user declares obfuscated-name artifacts on, its remapped counterpart, and
//! the classpaths and outgoing variants the role feeds.

use std::fmt;
use std::sync::LazyLock;

use serde::Serialize;

use crate::core::bucket_name::BucketName;
use crate::core::names::host;

/// Which outgoing variants receive an entry's source dependencies when this
/// project is consumed by others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishingMode {
    None,
    CompileOnly,
    RuntimeOnly,
    CompileAndRuntime,
}

impl PublishingMode {
    /// Outgoing bucket names for this mode.
    pub fn outgoing_buckets(&self) -> &'static [&'static str] {
        match self {
            PublishingMode::None => &[],
            PublishingMode::CompileOnly => &[host::API_ELEMENTS],
            PublishingMode::RuntimeOnly => &[host::RUNTIME_ELEMENTS],
            PublishingMode::CompileAndRuntime => &[host::API_ELEMENTS, host::RUNTIME_ELEMENTS],
        }
    }
}

impl fmt::Display for PublishingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishingMode::None => write!(f, "none"),
            PublishingMode::CompileOnly => write!(f, "compile only"),
            PublishingMode::RuntimeOnly => write!(f, "runtime only"),
            PublishingMode::CompileAndRuntime => write!(f, "compile and runtime"),
        }
    }
}

/// One mod dependency role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemappedEntry {
    /// Authored by the user, holds artifacts with obfuscated names
    pub source: BucketName,

    /// Holds the same artifacts after remapping
    pub remapped: BucketName,

    pub compile_classpath: bool,

    pub runtime_classpath: bool,

    pub publishing: PublishingMode,
}

impl RemappedEntry {
    /// Create an entry whose remapped bucket is `<source>Mapped`.
    pub fn new(
        source: impl Into<BucketName>,
        compile_classpath: bool,
        runtime_classpath: bool,
        publishing: PublishingMode,
    ) -> Self {
        let source = source.into();
        RemappedEntry {
            remapped: source.mapped(),
            source,
            compile_classpath,
            runtime_classpath,
            publishing,
        }
    }

    /// Use an explicit name for the remapped bucket.
    pub fn with_remapped(mut self, remapped: impl Into<BucketName>) -> Self {
        self.remapped = remapped.into();
        self
    }
}

static DEFAULT_ENTRIES: LazyLock<Vec<RemappedEntry>> = LazyLock::new(|| {
    vec![
        RemappedEntry::new("modApi", true, true, PublishingMode::CompileAndRuntime),
        RemappedEntry::new("modImplementation", true, true, PublishingMode::RuntimeOnly),
        RemappedEntry::new("modRuntimeOnly", false, true, PublishingMode::RuntimeOnly),
        RemappedEntry::new("modCompileOnly", true, false, PublishingMode::None),
        RemappedEntry::new("modCompileOnlyApi", true, false, PublishingMode::CompileOnly),
        RemappedEntry::new("modLocalRuntime", false, true, PublishingMode::None),
    ]
});

/// The built-in mod dependency roles.
pub fn default_entries() -> &'static [RemappedEntry] {
    &DEFAULT_ENTRIES
}
