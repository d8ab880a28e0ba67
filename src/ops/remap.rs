//! Packaged output handling after the providers have run.

use std::fmt;

use anyhow::Result;

use crate::core::names::{buckets, tasks};
use crate::core::project::Project;
use crate::core::task::Task;

/// How the project's packaged output is published.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Output is remapped back to obfuscated names before publishing.
    Remapped,
    /// Raw output is published as-is; the project only consumes mods.
    Unmapped,
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputMode::Remapped => write!(f, "remapped"),
            OutputMode::Unmapped => write!(f, "unmapped"),
        }
    }
}

/// Select the output mode and wire the output into `namedElements`.
///
/// Reading the remap switch freezes it.
pub fn configure_output(project: &mut Project) -> Result<OutputMode> {
    let mode = if project.settings_mut().remap_archives.finalize_value() {
        OutputMode::Remapped
    } else {
        OutputMode::Unmapped
    };
    tracing::info!("Publishing {} output", mode);

    let artifact = match mode {
        OutputMode::Remapped => {
            project.tasks_mut().register(Task::remap_jar(tasks::JAR));
            tasks::REMAP_JAR
        }
        OutputMode::Unmapped => {
            project.add_unmapped_output(tasks::JAR);
            tasks::JAR
        }
    };

    project
        .buckets_mut()
        .get_or_create(buckets::NAMED_ELEMENTS)?
        .add_artifact(artifact);

    Ok(mode)
}
