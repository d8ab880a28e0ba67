//! Bucket graph error types and diagnostics.

use thiserror::Error;

use crate::core::bucket::Roles;
use crate::util::diagnostic::{suggestions, Diagnostic};

/// Fatal error while wiring or finalizing the bucket graph.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("bucket `{bucket}` was referenced but never created")]
    UnknownBucket {
        bucket: String,
        referenced_by: Vec<String>,
    },

    #[error("`{child}` ({child_roles}) cannot extend `{parent}` ({parent_roles})")]
    IncompatibleRoles {
        child: String,
        child_roles: Roles,
        parent: String,
        parent_roles: Roles,
    },

    #[error("cycle detected in bucket graph")]
    CycleDetected { buckets: Vec<String> },
}

impl GraphError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            GraphError::UnknownBucket {
                bucket,
                referenced_by,
            } => {
                let mut diag = Diagnostic::error(format!("unknown bucket `{}`", bucket));

                for referrer in referenced_by {
                    diag = diag.with_context(format!("referenced by `{}`", referrer));
                }

                diag.with_suggestion(suggestions::DECLARE_BUCKET)
                    .with_suggestion(format!("Check the spelling of `{}`", bucket))
            }

            GraphError::IncompatibleRoles {
                child,
                child_roles,
                parent,
                parent_roles,
            } => Diagnostic::error(format!(
                "`{}` cannot draw dependencies from `{}`",
                child, parent
            ))
            .with_context(format!("`{}` is {}", child, child_roles))
            .with_context(format!("`{}` is {}", parent, parent_roles))
            .with_suggestion(format!(
                "Declare the dependencies on a declarable bucket that both `{}` and `{}` extend",
                child, parent
            )),

            GraphError::CycleDetected { buckets } => {
                Diagnostic::error("cycle detected in bucket graph")
                    .with_context(format!("cycle: {}", buckets.join(" -> ")))
                    .with_suggestion(
                        "Remove one of the extends-from edges that closes the cycle".to_string(),
                    )
            }
        }
    }
}
