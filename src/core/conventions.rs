//! Buckets and tasks declared by the host's primary language plugin.
//!
//! These exist before this subsystem runs. The graph builder wires its own
//! buckets into them by name.

use crate::core::bucket::Roles;
use crate::core::names::host::*;
use crate::core::task::{Task, TaskContainer};
use crate::graph::{BucketRegistry, GraphError};

const DECLARABLE: &[&str] = &[
    API,
    IMPLEMENTATION,
    COMPILE_ONLY,
    COMPILE_ONLY_API,
    RUNTIME_ONLY,
    TEST_IMPLEMENTATION,
    TEST_COMPILE_ONLY,
    TEST_RUNTIME_ONLY,
];

const RESOLVABLE: &[&str] = &[
    COMPILE_CLASSPATH,
    RUNTIME_CLASSPATH,
    TEST_COMPILE_CLASSPATH,
    TEST_RUNTIME_CLASSPATH,
];

const CONSUMABLE: &[&str] = &[API_ELEMENTS, RUNTIME_ELEMENTS];

/// (child, parent)
const EDGES: &[(&str, &str)] = &[
    (IMPLEMENTATION, API),
    (COMPILE_ONLY, COMPILE_ONLY_API),
    (COMPILE_CLASSPATH, COMPILE_ONLY),
    (COMPILE_CLASSPATH, IMPLEMENTATION),
    (RUNTIME_CLASSPATH, RUNTIME_ONLY),
    (RUNTIME_CLASSPATH, IMPLEMENTATION),
    (TEST_IMPLEMENTATION, IMPLEMENTATION),
    (TEST_COMPILE_CLASSPATH, TEST_COMPILE_ONLY),
    (TEST_COMPILE_CLASSPATH, TEST_IMPLEMENTATION),
    (TEST_RUNTIME_CLASSPATH, TEST_RUNTIME_ONLY),
    (TEST_RUNTIME_CLASSPATH, TEST_IMPLEMENTATION),
    (API_ELEMENTS, API),
    (API_ELEMENTS, COMPILE_ONLY_API),
    (RUNTIME_ELEMENTS, IMPLEMENTATION),
    (RUNTIME_ELEMENTS, RUNTIME_ONLY),
];

/// Declare the primary language buckets and their edges, then register the
/// resource and `jar` tasks.
pub fn apply_java_conventions(
    buckets: &mut BucketRegistry,
    tasks: &mut TaskContainer,
) -> Result<(), GraphError> {
    let groups = [
        (DECLARABLE, Roles::DECLARABLE),
        (RESOLVABLE, Roles::RESOLVABLE),
        (CONSUMABLE, Roles::CONSUMABLE),
    ];
    for (names, roles) in groups {
        for name in names {
            buckets.get_or_create(*name)?.set_roles(roles);
        }
    }

    for (child, parent) in EDGES {
        buckets.extends_from(*child, *parent)?;
    }

    tasks.register(Task::process_resources());
    tasks.register(Task::jar());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_java_conventions() {
        let mut buckets = BucketRegistry::new();
        let mut tasks = TaskContainer::default();
        apply_java_conventions(&mut buckets, &mut tasks).unwrap();

        assert_eq!(buckets.get(API).unwrap().roles(), Roles::DECLARABLE);
        assert_eq!(
            buckets.get(COMPILE_CLASSPATH).unwrap().roles(),
            Roles::RESOLVABLE
        );
        assert_eq!(buckets.get(API_ELEMENTS).unwrap().roles(), Roles::CONSUMABLE);

        assert!(buckets.includes(COMPILE_CLASSPATH, API));
        assert!(buckets.includes(TEST_RUNTIME_CLASSPATH, API));
        assert!(!buckets.includes(COMPILE_CLASSPATH, RUNTIME_ONLY));

        assert!(tasks.contains("processResources"));
        assert!(tasks.contains("jar"));
    }
}
