//! Code generation invokers.
//!
//! An invoker injects the arguments a toolchain's annotation processors
//! need into that toolchain's compile options. The host supplies one
//! invoker per toolchain; [`AnnotationProcessorInvoker`] is the built-in
//! implementation.

use std::path::PathBuf;

use anyhow::Result;
use thiserror::Error;

use crate::core::names::buckets;
use crate::core::project::Project;
use crate::toolchain::Toolchain;
use crate::util::diagnostic::Diagnostic;

/// Processor option keys.
pub mod options {
    pub const IN_MAP_FILE: &str = "inMapFileNamedIntermediary";
    pub const OUT_MAP_FILE: &str = "outMapFileNamedIntermediary";
    pub const OUT_REFMAP_FILE: &str = "outRefMapFile";
    pub const DEFAULT_OBFUSCATION_ENV: &str = "defaultObfuscationEnv";

    /// Generated code refers to developer names and is remapped to
    /// intermediary names.
    pub const NAMED_INTERMEDIARY: &str = "named:intermediary";
}

#[derive(Debug, Error)]
pub enum InvokerError {
    #[error("no mappings available for {toolchain} code generation")]
    MissingMappings { toolchain: Toolchain },
}

impl InvokerError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            InvokerError::MissingMappings { toolchain } => {
                Diagnostic::error(self.to_string())
                    .with_context(format!(
                        "`{}` is empty after the mapping provider ran",
                        buckets::MAPPINGS_FINAL
                    ))
                    .with_suggestion(format!(
                        "Declare a mappings dependency on `{}`",
                        buckets::MAPPINGS
                    ))
                    .with_suggestion(format!(
                        "Disable annotation processing for {} with `mixin.legacy-ap = false`",
                        toolchain
                    ))
            }
        }
    }
}

/// Configures one toolchain's compile-time code generation.
///
/// Called at most once per toolchain per build, after every provider has
/// run.
pub trait CodegenInvoker {
    fn configure_code_generation(&mut self, project: &mut Project) -> Result<()>;
}

/// Injects the mixin annotation processor options.
///
/// Java and Scala compile through javac and receive the options as `-A`
/// arguments; Kapt takes them as a processor option map.
#[derive(Debug, Clone)]
pub struct AnnotationProcessorInvoker {
    toolchain: Toolchain,
}

impl AnnotationProcessorInvoker {
    pub fn new(toolchain: Toolchain) -> Self {
        AnnotationProcessorInvoker { toolchain }
    }

    pub fn toolchain(&self) -> Toolchain {
        self.toolchain
    }

    fn refmap_name(project: &Project) -> String {
        project
            .settings()
            .refmap_name
            .clone()
            .unwrap_or_else(|| format!("{}-refmap.json", project.name()))
    }

    fn processor_options(&self, project: &Project) -> Result<Vec<(&'static str, String)>> {
        let mappings = project
            .buckets()
            .get(buckets::MAPPINGS_FINAL)
            .and_then(|b| b.dependencies().next())
            .ok_or(InvokerError::MissingMappings {
                toolchain: self.toolchain,
            })?;

        let task_dir: PathBuf = project
            .build_dir()
            .join("tmp")
            .join(format!("compile{}", self.toolchain_suffix()));

        Ok(vec![
            (options::IN_MAP_FILE, mappings.to_string()),
            (
                options::OUT_MAP_FILE,
                task_dir.join("named-intermediary.tiny").display().to_string(),
            ),
            (
                options::OUT_REFMAP_FILE,
                task_dir.join(Self::refmap_name(project)).display().to_string(),
            ),
            (
                options::DEFAULT_OBFUSCATION_ENV,
                options::NAMED_INTERMEDIARY.to_string(),
            ),
        ])
    }

    fn toolchain_suffix(&self) -> &'static str {
        match self.toolchain {
            Toolchain::Java => "Java",
            Toolchain::Scala => "Scala",
            Toolchain::Kapt => "Kotlin",
        }
    }
}

impl CodegenInvoker for AnnotationProcessorInvoker {
    fn configure_code_generation(&mut self, project: &mut Project) -> Result<()> {
        let processor_options = self.processor_options(project)?;
        let compile = project.compile_options_mut(self.toolchain);

        for (key, value) in processor_options {
            match self.toolchain {
                Toolchain::Java | Toolchain::Scala => {
                    compile.add_arg(format!("-A{}={}", key, value))
                }
                Toolchain::Kapt => compile.set_processor_option(key, value),
            }
        }

        Ok(())
    }
}

/// One invoker per toolchain.
pub struct InvokerSet {
    java: Box<dyn CodegenInvoker>,
    scala: Box<dyn CodegenInvoker>,
    kapt: Box<dyn CodegenInvoker>,
}

impl InvokerSet {
    pub fn new(
        java: impl CodegenInvoker + 'static,
        scala: impl CodegenInvoker + 'static,
        kapt: impl CodegenInvoker + 'static,
    ) -> Self {
        InvokerSet {
            java: Box::new(java),
            scala: Box::new(scala),
            kapt: Box::new(kapt),
        }
    }

    /// The built-in invoker for every toolchain.
    pub fn standard() -> Self {
        InvokerSet::new(
            AnnotationProcessorInvoker::new(Toolchain::Java),
            AnnotationProcessorInvoker::new(Toolchain::Scala),
            AnnotationProcessorInvoker::new(Toolchain::Kapt),
        )
    }

    pub fn get_mut(&mut self, toolchain: Toolchain) -> &mut dyn CodegenInvoker {
        match toolchain {
            Toolchain::Java => self.java.as_mut(),
            Toolchain::Scala => self.scala.as_mut(),
            Toolchain::Kapt => self.kapt.as_mut(),
        }
    }
}

impl Default for InvokerSet {
    fn default() -> Self {
        Self::standard()
    }
}
