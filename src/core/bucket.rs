//! Dependency buckets.
//!
//! A bucket is a named group of dependencies. Its flags decide how the host
//! treats it, and its extends-from set pulls every member of another bucket
//! into this one.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::core::bucket_name::BucketName;

/// What a bucket may be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Roles {
    /// Other projects may draw from it.
    pub consumable: bool,
    /// This project may resolve it to a concrete artifact set.
    pub resolvable: bool,
}

impl Roles {
    /// Both consumable and resolvable, the host default for new buckets.
    pub const LEGACY: Roles = Roles {
        consumable: true,
        resolvable: true,
    };

    /// Only holds declarations.
    pub const DECLARABLE: Roles = Roles {
        consumable: false,
        resolvable: false,
    };

    /// Resolved by this project, never published.
    pub const RESOLVABLE: Roles = Roles {
        consumable: false,
        resolvable: true,
    };

    /// Published to other projects, never resolved here.
    pub const CONSUMABLE: Roles = Roles {
        consumable: true,
        resolvable: false,
    };

    /// An outgoing variant cannot feed a bucket this project resolves.
    pub fn is_consumable_only(&self) -> bool {
        self.consumable && !self.resolvable
    }
}

impl Default for Roles {
    fn default() -> Self {
        Roles::LEGACY
    }
}

impl fmt::Display for Roles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.consumable, self.resolvable) {
            (true, true) => write!(f, "consumable and resolvable"),
            (true, false) => write!(f, "consumable only"),
            (false, true) => write!(f, "resolvable only"),
            (false, false) => write!(f, "declarable only"),
        }
    }
}

/// A named dependency container.
#[derive(Debug, Clone, Serialize)]
pub struct Bucket {
    /// Unique name
    name: BucketName,

    /// Whether a member's own dependencies are pulled in
    transitive: bool,

    /// Consumable/resolvable flags
    roles: Roles,

    /// Buckets whose members are members of this one too
    extends_from: BTreeSet<BucketName>,

    /// Dependency coordinates declared directly on this bucket
    dependencies: BTreeSet<String>,

    /// Outputs published through this bucket
    artifacts: BTreeSet<String>,
}

impl Bucket {
    /// Create a bucket with the host defaults.
    pub fn new(name: impl Into<BucketName>) -> Self {
        Bucket {
            name: name.into(),
            transitive: true,
            roles: Roles::default(),
            extends_from: BTreeSet::new(),
            dependencies: BTreeSet::new(),
            artifacts: BTreeSet::new(),
        }
    }

    pub fn name(&self) -> &BucketName {
        &self.name
    }

    pub fn is_transitive(&self) -> bool {
        self.transitive
    }

    pub fn set_transitive(&mut self, transitive: bool) {
        self.transitive = transitive;
    }

    pub fn roles(&self) -> Roles {
        self.roles
    }

    pub fn set_roles(&mut self, roles: Roles) {
        self.roles = roles;
    }

    pub fn set_consumable(&mut self, consumable: bool) {
        self.roles.consumable = consumable;
    }

    pub fn set_resolvable(&mut self, resolvable: bool) {
        self.roles.resolvable = resolvable;
    }

    /// Buckets this one extends, in name order.
    pub fn extends_from(&self) -> impl Iterator<Item = &BucketName> + '_ {
        self.extends_from.iter()
    }

    /// Check for a direct extends-from edge.
    pub fn directly_extends(&self, parent: &str) -> bool {
        self.extends_from.contains(parent)
    }

    /// Record an edge. Returns false if it was already present.
    ///
    /// Role and cycle checks live in the registry, which sees both ends.
    pub(crate) fn insert_parent(&mut self, parent: BucketName) -> bool {
        self.extends_from.insert(parent)
    }

    /// Declare a dependency coordinate on this bucket.
    pub fn add_dependency(&mut self, coordinate: impl Into<String>) {
        self.dependencies.insert(coordinate.into());
    }

    pub fn dependencies(&self) -> impl Iterator<Item = &str> + '_ {
        self.dependencies.iter().map(|d| d.as_str())
    }

    pub fn has_dependencies(&self) -> bool {
        !self.dependencies.is_empty()
    }

    /// Publish an output through this bucket.
    pub fn add_artifact(&mut self, artifact: impl Into<String>) {
        self.artifacts.insert(artifact.into());
    }

    pub fn artifacts(&self) -> impl Iterator<Item = &str> + '_ {
        self.artifacts.iter().map(|a| a.as_str())
    }
}
