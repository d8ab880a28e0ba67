//! Provider orchestration.
//!
//! Three providers prepare the project once its model is complete: the
//! runtime artifact, then the mappings, then the launch configuration.
//! Each one relies on what the previous ones resolved, so the order is
//! fixed and the sequence runs once. A failure leaves the project half
//! prepared; there is no retry.

use std::fmt;

use anyhow::Result;
use thiserror::Error;

use crate::core::project::Project;
use crate::util::diagnostic::{suggestions, Diagnostic};

/// The preparatory providers, in run order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    RuntimeArtifact,
    Mappings,
    Launch,
}

impl ProviderKind {
    pub const ORDER: [ProviderKind; 3] = [
        ProviderKind::RuntimeArtifact,
        ProviderKind::Mappings,
        ProviderKind::Launch,
    ];
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::RuntimeArtifact => write!(f, "runtime artifact"),
            ProviderKind::Mappings => write!(f, "mappings"),
            ProviderKind::Launch => write!(f, "launch"),
        }
    }
}

/// A one-shot preparation step supplied by the host.
///
/// Providers may read any bucket wired during plugin application and may
/// populate further buckets for the providers after them.
pub trait Provider {
    fn provide(&mut self, project: &mut Project) -> Result<()>;
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{kind} provider failed")]
    Failed {
        kind: ProviderKind,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("providers have already run for this project")]
    AlreadyRan,
}

impl ProviderError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ProviderError::Failed { kind, source } => {
                let mut diag = Diagnostic::error(self.to_string()).with_context(source.to_string());

                let skipped: Vec<_> = ProviderKind::ORDER
                    .iter()
                    .skip_while(|k| *k != kind)
                    .skip(1)
                    .map(|k| k.to_string())
                    .collect();
                if !skipped.is_empty() {
                    diag = diag.with_context(format!("not run: {}", skipped.join(", ")));
                }

                diag.with_suggestion(suggestions::PROVIDER_FAILED)
            }
            ProviderError::AlreadyRan => Diagnostic::error(self.to_string())
                .with_suggestion("Providers run once per build; do not trigger them again"),
        }
    }
}

/// Runs the providers in order, once.
pub struct DependencyManager {
    providers: [Box<dyn Provider>; 3],
    started: bool,
    completed: Vec<ProviderKind>,
}

impl DependencyManager {
    pub fn new(
        runtime_artifact: impl Provider + 'static,
        mappings: impl Provider + 'static,
        launch: impl Provider + 'static,
    ) -> Self {
        DependencyManager {
            providers: [
                Box::new(runtime_artifact),
                Box::new(mappings),
                Box::new(launch),
            ],
            started: false,
            completed: Vec::new(),
        }
    }

    /// Run every provider in order.
    ///
    /// Stops at the first failure. Calling this again, whether or not the
    /// first call succeeded, is an error.
    pub fn handle_dependencies(&mut self, project: &mut Project) -> Result<()> {
        if self.started {
            return Err(ProviderError::AlreadyRan.into());
        }
        self.started = true;

        for (kind, provider) in ProviderKind::ORDER.into_iter().zip(self.providers.iter_mut()) {
            tracing::info!("Running {} provider", kind);

            provider
                .provide(project)
                .map_err(|source| ProviderError::Failed {
                    kind,
                    source: source.into(),
                })?;

            self.completed.push(kind);
            tracing::debug!("{} provider finished", kind);
        }

        Ok(())
    }

    /// Providers that finished successfully, in run order.
    pub fn completed(&self) -> &[ProviderKind] {
        &self.completed
    }
}

impl fmt::Debug for DependencyManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependencyManager")
            .field("started", &self.started)
            .field("completed", &self.completed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{CallLog, RecordingProvider};

    #[test]
    fn test_providers_run_in_order() {
        let (mut manager, log) = RecordingProvider::trio();
        let mut project = Project::with_java("examplemod").unwrap();

        manager.handle_dependencies(&mut project).unwrap();

        assert_eq!(*log.borrow(), ProviderKind::ORDER);
        assert_eq!(manager.completed(), ProviderKind::ORDER);
        assert!(project
            .buckets()
            .get("mappingsFinal")
            .unwrap()
            .has_dependencies());
    }

    #[test]
    fn test_second_run_is_rejected() {
        let (mut manager, log) = RecordingProvider::trio();
        let mut project = Project::with_java("examplemod").unwrap();

        manager.handle_dependencies(&mut project).unwrap();
        let err = manager.handle_dependencies(&mut project).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ProviderError>(),
            Some(ProviderError::AlreadyRan)
        ));
        assert_eq!(log.borrow().len(), 3);
    }

    #[test]
    fn test_failure_stops_the_sequence() {
        let log = CallLog::default();
        let mut manager = DependencyManager::new(
            RecordingProvider::new(ProviderKind::RuntimeArtifact, &log),
            RecordingProvider::new(ProviderKind::Mappings, &log).failing(),
            RecordingProvider::new(ProviderKind::Launch, &log),
        );
        let mut project = Project::with_java("examplemod").unwrap();

        let err = manager.handle_dependencies(&mut project).unwrap_err();

        assert_eq!(
            *log.borrow(),
            vec![ProviderKind::RuntimeArtifact, ProviderKind::Mappings]
        );
        assert_eq!(manager.completed(), &[ProviderKind::RuntimeArtifact]);

        let err = err.downcast_ref::<ProviderError>().unwrap();
        assert!(matches!(
            err,
            ProviderError::Failed {
                kind: ProviderKind::Mappings,
                ..
            }
        ));

        let output = err.to_diagnostic().format(false);
        assert!(output.contains("mappings provider failed"));
        assert!(output.contains("not run: launch"));

        // No retry after a failure either
        assert!(manager.handle_dependencies(&mut project).is_err());
        assert_eq!(log.borrow().len(), 2);
    }
}
