//! Test doubles for the host-facing seams.
//!
//! Providers and invokers are supplied by the host in real builds. The
//! recording versions here log every call into a shared list so tests can
//! assert on order, and can be told to fail.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{bail, Result};

use crate::core::project::Project;
use crate::ops::orchestrate::{DependencyManager, Provider, ProviderKind};
use crate::toolchain::{CodegenInvoker, Toolchain};

/// Shared call log.
pub type CallLog<T> = Rc<RefCell<Vec<T>>>;

/// Provider that records its kind when it runs.
#[derive(Debug, Clone)]
pub struct RecordingProvider {
    kind: ProviderKind,
    log: CallLog<ProviderKind>,
    fail: bool,
    populates: Vec<(&'static str, String)>,
}

impl RecordingProvider {
    pub fn new(kind: ProviderKind, log: &CallLog<ProviderKind>) -> Self {
        RecordingProvider {
            kind,
            log: Rc::clone(log),
            fail: false,
            populates: Vec::new(),
        }
    }

    /// Fail after recording the call.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Add `coordinate` to `bucket` when the provider runs.
    pub fn populating(mut self, bucket: &'static str, coordinate: impl Into<String>) -> Self {
        self.populates.push((bucket, coordinate.into()));
        self
    }

    /// A full provider set sharing one log. The mapping provider fills
    /// `mappingsFinal` so code generation can run.
    pub fn trio() -> (DependencyManager, CallLog<ProviderKind>) {
        let log = CallLog::default();
        let manager = DependencyManager::new(
            RecordingProvider::new(ProviderKind::RuntimeArtifact, &log),
            RecordingProvider::new(ProviderKind::Mappings, &log)
                .populating(crate::core::names::buckets::MAPPINGS_FINAL, "mappings/final.tiny"),
            RecordingProvider::new(ProviderKind::Launch, &log),
        );
        (manager, log)
    }
}

impl Provider for RecordingProvider {
    fn provide(&mut self, project: &mut Project) -> Result<()> {
        self.log.borrow_mut().push(self.kind);

        if self.fail {
            bail!("{} provider could not resolve its inputs", self.kind);
        }

        for (bucket, coordinate) in &self.populates {
            project
                .buckets_mut()
                .get_or_create(*bucket)?
                .add_dependency(coordinate.clone());
        }
        Ok(())
    }
}

/// Invoker that records its toolchain when it runs.
#[derive(Debug, Clone)]
pub struct RecordingInvoker {
    toolchain: Toolchain,
    log: CallLog<Toolchain>,
}

impl RecordingInvoker {
    pub fn new(toolchain: Toolchain, log: &CallLog<Toolchain>) -> Self {
        RecordingInvoker {
            toolchain,
            log: Rc::clone(log),
        }
    }

    /// One invoker per toolchain, sharing a log.
    pub fn trio() -> (Self, Self, Self, CallLog<Toolchain>) {
        let log = CallLog::default();
        (
            RecordingInvoker::new(Toolchain::Java, &log),
            RecordingInvoker::new(Toolchain::Scala, &log),
            RecordingInvoker::new(Toolchain::Kapt, &log),
            log,
        )
    }
}

impl CodegenInvoker for RecordingInvoker {
    fn configure_code_generation(&mut self, _project: &mut Project) -> Result<()> {
        self.log.borrow_mut().push(self.toolchain);
        Ok(())
    }
}
