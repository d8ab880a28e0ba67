//! Compile-time code generation per language toolchain.
//!
//! The primary toolchain is always configured. Each secondary toolchain is
//! detected on its own by its plugin and configured in addition, so one
//! project can end up with several invokers running in the same pass.

pub mod guards;
pub mod invoker;
pub mod selector;

use std::collections::BTreeMap;
use std::fmt;

pub use invoker::{AnnotationProcessorInvoker, CodegenInvoker, InvokerError, InvokerSet};
pub use selector::{active_toolchains, check_plugin_order, configure_code_generation};

use crate::core::names::plugins;

/// A compiled-language toolchain that can run code generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Toolchain {
    Java,
    Scala,
    Kapt,
}

impl Toolchain {
    /// Every toolchain, in detection order.
    pub const ALL: [Toolchain; 3] = [Toolchain::Java, Toolchain::Scala, Toolchain::Kapt];

    /// Plugin whose presence activates this toolchain.
    pub fn plugin_id(&self) -> &'static str {
        match self {
            Toolchain::Java => plugins::JAVA,
            Toolchain::Scala => plugins::SCALA,
            Toolchain::Kapt => plugins::KAPT,
        }
    }

    /// The primary toolchain runs whether or not its plugin is queried.
    pub fn is_primary(&self) -> bool {
        matches!(self, Toolchain::Java)
    }
}

impl fmt::Display for Toolchain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Toolchain::Java => write!(f, "Java"),
            Toolchain::Scala => write!(f, "Scala"),
            Toolchain::Kapt => write!(f, "Kapt plugin"),
        }
    }
}

/// Compiler settings for one toolchain's compile tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileOptions {
    /// Source file encoding
    pub encoding: Option<String>,

    /// Extra compiler arguments, in insertion order
    args: Vec<String>,

    /// Annotation processor options, for toolchains that take them as a map
    processor_options: BTreeMap<String, String>,
}

impl CompileOptions {
    /// Append a compiler argument unless it is already present.
    pub fn add_arg(&mut self, arg: impl Into<String>) {
        let arg = arg.into();
        if !self.args.contains(&arg) {
            self.args.push(arg);
        }
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn set_processor_option(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.processor_options.insert(key.into(), value.into());
    }

    pub fn processor_option(&self, key: &str) -> Option<&str> {
        self.processor_options.get(key).map(|v| v.as_str())
    }

    pub fn processor_options(&self) -> impl Iterator<Item = (&str, &str)> {
        self.processor_options
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
