//! Process-wide settings for the code generation step.
//!
//! The annotation processors log through a subsystem whose management and
//! shutdown hooks keep the compiler's class loader alive after the build.
//! These switches turn those hooks off. They are applied once per process
//! and never reverted.

use std::collections::BTreeMap;
use std::sync::OnceLock;

/// (property, value)
pub const LOGGING_GUARDS: [(&str, &str); 3] = [
    ("log4j2.disable.jmx", "true"),
    ("log4j.shutdownHookEnabled", "false"),
    ("log4j.skipJansi", "true"),
];

static APPLIED: OnceLock<BTreeMap<&'static str, &'static str>> = OnceLock::new();

/// Apply the logging guards. Returns true only for the first call in this
/// process.
pub fn apply_logging_guards() -> bool {
    let mut first = false;
    APPLIED.get_or_init(|| {
        first = true;
        tracing::debug!("applying {} logging guards", LOGGING_GUARDS.len());
        LOGGING_GUARDS.into_iter().collect()
    });
    first
}

pub fn guards_applied() -> bool {
    APPLIED.get().is_some()
}

/// Value of a guard property, once the guards are applied.
pub fn process_property(key: &str) -> Option<&'static str> {
    APPLIED.get().and_then(|props| props.get(key).copied())
}

/// Every applied property, for hosts forwarding them to a compiler process.
pub fn process_properties() -> impl Iterator<Item = (&'static str, &'static str)> {
    APPLIED
        .get()
        .into_iter()
        .flat_map(|props| props.iter().map(|(k, v)| (*k, *v)))
}
