//! Configuration graph builder.
//!
//! Creates the subsystem's buckets, wires every remapped entry into the
//! host classpaths and outgoing variants, and applies the edges that are
//! not tied to any single entry.
//!
//! Two rules matter most:
//! - A source bucket is always transitive and its remapped counterpart
//!   never is. Remapped artifacts are already flattened; expanding them
//!   again would pull un-remapped artifacts onto the classpath.
//! - Outgoing variants extend the *source* bucket, so published metadata
//!   points at re-resolvable coordinates rather than local remapped copies.
//!
//! Building is idempotent: edges are sets and flags are reassigned to the
//! same values, so a second pass changes nothing.

use crate::core::bucket::Roles;
use crate::core::names::{buckets::*, host};
use crate::graph::entry::{default_entries, RemappedEntry};
use crate::graph::errors::GraphError;
use crate::graph::registry::BucketRegistry;

/// A bucket owned by this subsystem and the flags it is created with.
struct FixedBucket {
    name: &'static str,
    transitive: Option<bool>,
    roles: Option<Roles>,
}

const fn fixed(name: &'static str, transitive: Option<bool>, roles: Option<Roles>) -> FixedBucket {
    FixedBucket {
        name,
        transitive,
        roles,
    }
}

const FIXED_BUCKETS: &[FixedBucket] = &[
    fixed(MOD_COMPILE_CLASSPATH, Some(true), None),
    fixed(MOD_COMPILE_CLASSPATH_MAPPED, Some(false), None),
    // Launchers do not recurse into dependencies
    fixed(MINECRAFT_NAMED, Some(false), None),
    fixed(MINECRAFT_DEPENDENCIES, Some(false), None),
    fixed(LOADER_DEPENDENCIES, Some(false), None),
    fixed(MINECRAFT, Some(false), None),
    // Nested jars are taken as-is
    fixed(INCLUDE, Some(false), None),
    fixed(MAPPING_CONSTANTS, None, None),
    fixed(NAMED_ELEMENTS, None, Some(Roles::CONSUMABLE)),
    fixed(MAPPINGS, None, None),
    fixed(MAPPINGS_FINAL, None, None),
    fixed(DEVELOPMENT_DEPENDENCIES, None, None),
    fixed(UNPICK_CLASSPATH, None, None),
    fixed(LOCAL_RUNTIME, None, None),
];

/// (child, parent) edges not tied to any entry.
const CROSS_CUTTING_EDGES: &[(&str, &str)] = &[
    (NAMED_ELEMENTS, host::API),
    (host::COMPILE_ONLY, MAPPING_CONSTANTS),
    (host::RUNTIME_CLASSPATH, LOCAL_RUNTIME),
    (host::COMPILE_CLASSPATH, MINECRAFT_NAMED),
    (host::RUNTIME_CLASSPATH, MINECRAFT_NAMED),
    (host::TEST_COMPILE_CLASSPATH, MINECRAFT_NAMED),
    (host::TEST_RUNTIME_CLASSPATH, MINECRAFT_NAMED),
    (LOADER_DEPENDENCIES, MINECRAFT_DEPENDENCIES),
    (MINECRAFT_NAMED, LOADER_DEPENDENCIES),
    (host::RUNTIME_CLASSPATH, MAPPINGS_FINAL),
    (host::TEST_RUNTIME_CLASSPATH, MAPPINGS_FINAL),
    (host::RUNTIME_CLASSPATH, DEVELOPMENT_DEPENDENCIES),
    (host::TEST_RUNTIME_CLASSPATH, DEVELOPMENT_DEPENDENCIES),
];

/// Builds the bucket graph for one project.
#[derive(Debug, Clone)]
pub struct GraphBuilder<'a> {
    entries: &'a [RemappedEntry],
}

impl GraphBuilder<'static> {
    /// Builder over the built-in entry table.
    pub fn with_defaults() -> Self {
        GraphBuilder {
            entries: default_entries(),
        }
    }
}

impl<'a> GraphBuilder<'a> {
    pub fn new(entries: &'a [RemappedEntry]) -> Self {
        GraphBuilder { entries }
    }

    pub fn entries(&self) -> &'a [RemappedEntry] {
        self.entries
    }

    /// Create and wire every bucket.
    pub fn build(&self, buckets: &mut BucketRegistry) -> Result<(), GraphError> {
        let edges_before = buckets.edges().len();

        self.create_fixed(buckets)?;
        for entry in self.entries {
            self.wire_entry(buckets, entry)?;
        }
        for (child, parent) in CROSS_CUTTING_EDGES {
            buckets.extends_from(*child, *parent)?;
        }

        tracing::debug!(
            "wired {} remapped entries, {} new edges",
            self.entries.len(),
            buckets.edges().len() - edges_before
        );
        Ok(())
    }

    fn create_fixed(&self, buckets: &mut BucketRegistry) -> Result<(), GraphError> {
        for bucket in FIXED_BUCKETS {
            buckets.register(bucket.name)?;

            if let Some(transitive) = bucket.transitive {
                buckets.configure(bucket.name, move |b| b.set_transitive(transitive));
            }
            if let Some(roles) = bucket.roles {
                buckets.configure(bucket.name, move |b| b.set_roles(roles));
            }
        }
        Ok(())
    }

    fn wire_entry(
        &self,
        buckets: &mut BucketRegistry,
        entry: &RemappedEntry,
    ) -> Result<(), GraphError> {
        let source = buckets.register(&entry.source)?;
        buckets.configure(&source, |b| b.set_transitive(true));

        let remapped = buckets.register(&entry.remapped)?;
        buckets.configure(&remapped, |b| b.set_transitive(false));

        if entry.compile_classpath {
            buckets.extends_from(MOD_COMPILE_CLASSPATH, &source)?;
            buckets.extends_from(MOD_COMPILE_CLASSPATH_MAPPED, &remapped)?;
            buckets.extends_from(host::COMPILE_CLASSPATH, &remapped)?;
            buckets.extends_from(host::TEST_COMPILE_CLASSPATH, &remapped)?;
        }

        if entry.runtime_classpath {
            buckets.extends_from(host::RUNTIME_CLASSPATH, &remapped)?;
            buckets.extends_from(host::TEST_RUNTIME_CLASSPATH, &remapped)?;
        }

        for outgoing in entry.publishing.outgoing_buckets() {
            buckets.extends_from(*outgoing, &source)?;
        }

        Ok(())
    }
}

impl Default for GraphBuilder<'static> {
    fn default() -> Self {
        Self::with_defaults()
    }
}
