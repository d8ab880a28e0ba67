//! Toolchain detection and invoker selection.

use anyhow::{Context, Result};

use crate::core::names::plugins;
use crate::core::plugin::PluginSet;
use crate::core::project::Project;
use crate::toolchain::guards::apply_logging_guards;
use crate::toolchain::invoker::InvokerSet;
use crate::toolchain::Toolchain;
use crate::util::diagnostic::OrderingViolationError;
use crate::PLUGIN_ID;

/// Toolchains to configure, in detection order.
///
/// The primary toolchain is always included. Secondary toolchains are
/// added independently, so several may be active at once.
pub fn active_toolchains(applied: &PluginSet) -> Vec<Toolchain> {
    Toolchain::ALL
        .into_iter()
        .filter(|toolchain| toolchain.is_primary() || applied.has_plugin(toolchain.plugin_id()))
        .collect()
}

/// Fail if Kotlin annotation processing was applied before us.
///
/// Kapt reads processor arguments as soon as it is applied, so anything
/// injected later is silently ignored.
pub fn check_plugin_order(applied: &PluginSet) -> Result<(), OrderingViolationError> {
    if applied.has_plugin(plugins::KAPT) {
        return Err(OrderingViolationError {
            required_first: PLUGIN_ID.to_string(),
            applied_early: plugins::KAPT.to_string(),
        });
    }
    Ok(())
}

/// Run the invoker of every active toolchain.
///
/// Secondary toolchains that inject arguments into the same compile task
/// both run, in detection order; their arguments are not reconciled.
pub fn configure_code_generation(
    project: &mut Project,
    invokers: &mut InvokerSet,
) -> Result<Vec<Toolchain>> {
    apply_logging_guards();

    let toolchains = active_toolchains(project.plugins());
    for toolchain in &toolchains {
        tracing::info!("Configuring compiler arguments for {}", toolchain);
        invokers
            .get_mut(*toolchain)
            .configure_code_generation(project)
            .with_context(|| format!("failed to configure code generation for {}", toolchain))?;
    }

    Ok(toolchains)
}
