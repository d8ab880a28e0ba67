//! The host project as seen by this subsystem.
//!
//! The host configures a project on one thread: plugins are applied, the
//! build script runs, and finally every callback registered with
//! [`Project::after_evaluate`] fires once, in registration order. After the
//! callbacks the bucket graph is finalized and frozen.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::core::conventions::apply_java_conventions;
use crate::core::names::plugins;
use crate::core::plugin::PluginSet;
use crate::core::settings::ModSettings;
use crate::core::task::TaskContainer;
use crate::graph::{BucketGraph, BucketRegistry};
use crate::toolchain::{CompileOptions, Toolchain};

/// Callback fired once the project model is complete.
pub type AfterEvaluate = Box<dyn FnOnce(&mut Project) -> Result<()>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Configuring,
    Evaluating,
    Evaluated,
}

/// One project being configured by the host.
pub struct Project {
    name: String,
    build_dir: PathBuf,
    buckets: BucketRegistry,
    plugins: PluginSet,
    tasks: TaskContainer,
    settings: ModSettings,
    compile_options: BTreeMap<Toolchain, CompileOptions>,
    unmapped_outputs: Vec<String>,
    after_evaluate: Vec<AfterEvaluate>,
    state: State,
    graph: Option<BucketGraph>,
}

impl Project {
    /// Create an empty project.
    pub fn new(name: impl Into<String>) -> Self {
        Project {
            name: name.into(),
            build_dir: PathBuf::from("build"),
            buckets: BucketRegistry::new(),
            plugins: PluginSet::new(),
            tasks: TaskContainer::default(),
            settings: ModSettings::default(),
            compile_options: BTreeMap::new(),
            unmapped_outputs: Vec::new(),
            after_evaluate: Vec::new(),
            state: State::Configuring,
            graph: None,
        }
    }

    /// Create a project with the primary language plugin applied.
    pub fn with_java(name: impl Into<String>) -> Result<Self> {
        let mut project = Project::new(name);
        project.apply_plugin(plugins::JAVA)?;
        Ok(project)
    }

    pub fn with_build_dir(mut self, build_dir: impl Into<PathBuf>) -> Self {
        self.build_dir = build_dir.into();
        self
    }

    pub fn with_settings(mut self, settings: ModSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    /// Record a plugin as applied. Returns false if it already was.
    ///
    /// The primary language plugin declares its buckets and tasks the first
    /// time it is applied.
    pub fn apply_plugin(&mut self, id: &str) -> Result<bool> {
        if !self.plugins.apply(id) {
            return Ok(false);
        }

        tracing::debug!("applied plugin {} to {}", id, self.name);
        if id == plugins::JAVA {
            apply_java_conventions(&mut self.buckets, &mut self.tasks)?;
        }
        Ok(true)
    }

    pub fn has_plugin(&self, id: &str) -> bool {
        self.plugins.has_plugin(id)
    }

    pub fn plugins(&self) -> &PluginSet {
        &self.plugins
    }

    pub fn buckets(&self) -> &BucketRegistry {
        &self.buckets
    }

    pub fn buckets_mut(&mut self) -> &mut BucketRegistry {
        &mut self.buckets
    }

    pub fn tasks(&self) -> &TaskContainer {
        &self.tasks
    }

    pub fn tasks_mut(&mut self) -> &mut TaskContainer {
        &mut self.tasks
    }

    pub fn settings(&self) -> &ModSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut ModSettings {
        &mut self.settings
    }

    /// Compile options for a toolchain, if anything configured them.
    pub fn compile_options(&self, toolchain: Toolchain) -> Option<&CompileOptions> {
        self.compile_options.get(&toolchain)
    }

    pub fn compile_options_mut(&mut self, toolchain: Toolchain) -> &mut CompileOptions {
        self.compile_options.entry(toolchain).or_default()
    }

    /// Outputs used as-is because the project is not remapped.
    pub fn unmapped_outputs(&self) -> &[String] {
        &self.unmapped_outputs
    }

    pub fn add_unmapped_output(&mut self, output: impl Into<String>) {
        self.unmapped_outputs.push(output.into());
    }

    /// Run `callback` once the whole project model is known.
    pub fn after_evaluate<F>(&mut self, callback: F)
    where
        F: FnOnce(&mut Project) -> Result<()> + 'static,
    {
        self.after_evaluate.push(Box::new(callback));
    }

    /// Fire the deferred callbacks and freeze the bucket graph.
    ///
    /// The first failure aborts evaluation; no further callbacks run.
    pub fn evaluate(&mut self) -> Result<&BucketGraph> {
        if self.state != State::Configuring {
            bail!("project `{}` has already been evaluated", self.name);
        }
        self.state = State::Evaluating;

        // Callbacks may register more callbacks; those run in the same pass
        while !self.after_evaluate.is_empty() {
            let callbacks = std::mem::take(&mut self.after_evaluate);
            for callback in callbacks {
                callback(self)?;
            }
        }

        let graph = self.buckets.finalize()?;
        self.state = State::Evaluated;
        tracing::debug!("finalized {} buckets for {}", graph.len(), self.name);

        Ok(self.graph.insert(graph))
    }

    pub fn is_evaluated(&self) -> bool {
        self.state == State::Evaluated
    }

    /// The frozen graph, once evaluation has finished.
    pub fn graph(&self) -> Option<&BucketGraph> {
        self.graph.as_ref()
    }
}

impl fmt::Debug for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Project")
            .field("name", &self.name)
            .field("plugins", &self.plugins)
            .field("buckets", &self.buckets)
            .field("state", &self.state)
            .field("pending_callbacks", &self.after_evaluate.len())
            .finish()
    }
}
