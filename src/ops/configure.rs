//! Plugin application.
//!
//! Applying the plugin wires the bucket graph right away. Everything that
//! depends on the finished project model (providers, output mode and code
//! generation) is deferred to a single after-evaluate callback.

use anyhow::Result;

use crate::core::names::plugins;
use crate::core::project::Project;
use crate::graph::{default_entries, GraphBuilder, RemappedEntry};
use crate::ops::orchestrate::DependencyManager;
use crate::ops::remap::configure_output;
use crate::toolchain::{check_plugin_order, configure_code_generation, InvokerSet, Toolchain};
use crate::PLUGIN_ID;

/// Encoding forced on every toolchain and every copy task.
pub const SOURCE_ENCODING: &str = "UTF-8";

/// The mod development plugin, ready to be applied to a project.
pub struct ModPlugin {
    entries: Vec<RemappedEntry>,
    providers: DependencyManager,
    invokers: InvokerSet,
}

impl ModPlugin {
    /// Plugin with the built-in entry table and invokers.
    pub fn new(providers: DependencyManager) -> Self {
        ModPlugin {
            entries: default_entries().to_vec(),
            providers,
            invokers: InvokerSet::standard(),
        }
    }

    /// Replace the remapped-entry table.
    pub fn with_entries(mut self, entries: Vec<RemappedEntry>) -> Self {
        self.entries = entries;
        self
    }

    pub fn with_invokers(mut self, invokers: InvokerSet) -> Self {
        self.invokers = invokers;
        self
    }

    pub fn entries(&self) -> &[RemappedEntry] {
        &self.entries
    }

    /// Apply the plugin to `project`.
    ///
    /// Fails before touching the project if Kotlin annotation processing
    /// was applied first. Applying to a project that already has the plugin
    /// does nothing.
    pub fn apply(self, project: &mut Project) -> Result<()> {
        if project.has_plugin(PLUGIN_ID) {
            tracing::debug!("{} is already applied to {}", PLUGIN_ID, project.name());
            return Ok(());
        }
        check_plugin_order(project.plugins())?;

        project.apply_plugin(plugins::JAVA)?;
        project.apply_plugin(PLUGIN_ID)?;

        GraphBuilder::new(&self.entries).build(project.buckets_mut())?;

        for toolchain in Toolchain::ALL {
            project.compile_options_mut(toolchain).encoding = Some(SOURCE_ENCODING.to_string());
        }
        project.tasks_mut().set_filtering_charset(SOURCE_ENCODING);

        let ModPlugin {
            mut providers,
            mut invokers,
            ..
        } = self;

        project.after_evaluate(move |project| {
            providers.handle_dependencies(project)?;
            configure_output(project)?;

            if project.settings_mut().legacy_mixin_ap.finalize_value() {
                let toolchains = configure_code_generation(project, &mut invokers)?;
                tracing::debug!("configured code generation for {} toolchains", toolchains.len());
            }
            Ok(())
        });

        Ok(())
    }
}
