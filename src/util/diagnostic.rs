//! User-facing diagnostics.
//!
//! Every fatal configuration error names the root cause, the buckets or
//! plugins involved, and what the user can change to fix it.

use std::fmt;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

/// Common suggestion messages.
pub mod suggestions {
    /// Ordering violation with annotation processing plugins.
    pub const APPLY_FIRST: &str =
        "Move this plugin above the annotation processing plugin in the plugins block";

    /// Unknown bucket reference.
    pub const DECLARE_BUCKET: &str =
        "Declare the bucket before the build finishes configuring, or remove the reference";

    /// Provider failure.
    pub const PROVIDER_FAILED: &str =
        "Re-run with verbose logging to see which preparation step failed";
}

/// A fatal configuration error, rendered for the user.
///
/// Renders as the message, one `->` line per context entry, then the
/// numbered suggestions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub context: Vec<String>,
    pub suggestions: Vec<String>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Render for a terminal, with ANSI colors if `color` is set.
    pub fn format(&self, color: bool) -> String {
        let paint = |code: &str, text: &str| {
            if color {
                format!("\x1b[1;{}m{}\x1b[0m", code, text)
            } else {
                text.to_string()
            }
        };

        let mut output = format!("{}: {}\n", paint("31", "error"), self.message);
        for line in &self.context {
            output.push_str(&format!("  -> {}\n", line));
        }

        if !self.suggestions.is_empty() {
            output.push_str(&format!("\n{}: consider:\n", paint("32", "help")));
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
            }
        }

        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(false))
    }
}

/// A plugin whose setup has to come after ours was applied first.
#[derive(Debug, Error, MietteDiagnostic)]
#[error("`{required_first}` must be applied BEFORE `{applied_early}` in the plugins block")]
#[diagnostic(
    code(modweave::configure::ordering_violation),
    help("`{applied_early}` reads its compiler arguments as soon as it is applied, so arguments injected afterwards never take effect")
)]
pub struct OrderingViolationError {
    /// The plugin that should have come first.
    pub required_first: String,
    /// The plugin that was applied too early.
    pub applied_early: String,
}

impl OrderingViolationError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.to_string())
            .with_context(format!(
                "`{}` was already applied when `{}` started configuring",
                self.applied_early, self.required_first
            ))
            .with_suggestion(suggestions::APPLY_FIRST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_formatting() {
        let diag = Diagnostic::error("unknown bucket `modShade`")
            .with_context("referenced by `compileClasspath`")
            .with_suggestion(suggestions::DECLARE_BUCKET);

        let output = diag.format(false);
        assert!(output.starts_with("error: unknown bucket `modShade`"));
        assert!(output.contains("-> referenced by `compileClasspath`"));
        assert!(output.contains("help: consider:"));
        assert!(output.contains("1. Declare the bucket"));
    }

    #[test]
    fn test_colored_output() {
        let output = Diagnostic::error("cycle detected in bucket graph")
            .with_suggestion("Remove one edge")
            .format(true);

        assert!(output.starts_with("\x1b[1;31merror\x1b[0m: cycle detected"));
        assert!(output.contains("\x1b[1;32mhelp\x1b[0m: consider:"));
    }

    #[test]
    fn test_ordering_violation_message() {
        let err = OrderingViolationError {
            required_first: "modweave".to_string(),
            applied_early: "org.jetbrains.kotlin.kapt".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "`modweave` must be applied BEFORE `org.jetbrains.kotlin.kapt` in the plugins block"
        );

        let output = err.to_diagnostic().format(false);
        assert!(output.contains("was already applied"));
        assert!(output.contains(suggestions::APPLY_FIRST));
    }
}
