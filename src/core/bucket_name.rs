//! Bucket identifiers.

use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// The unique name of a dependency bucket.
///
/// Ordered and hashed by its text, so maps keyed by `BucketName` can be
/// queried with a plain `&str`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BucketName(String);

impl BucketName {
    pub fn new(name: impl Into<String>) -> Self {
        BucketName(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derive the name of the remapped counterpart of this bucket.
    pub fn mapped(&self) -> BucketName {
        BucketName(format!("{}Mapped", self.0))
    }
}

impl Deref for BucketName {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for BucketName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for BucketName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for BucketName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for BucketName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Debug for BucketName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for BucketName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BucketName {
    fn from(s: &str) -> Self {
        BucketName::new(s)
    }
}

impl From<String> for BucketName {
    fn from(s: String) -> Self {
        BucketName(s)
    }
}

impl From<&BucketName> for BucketName {
    fn from(name: &BucketName) -> Self {
        name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_mapped_suffix() {
        let source = BucketName::new("modCompileOnly");
        assert_eq!(source.mapped(), "modCompileOnlyMapped");
    }

    #[test]
    fn test_str_lookup() {
        let names: BTreeSet<_> = ["runtimeClasspath", "api", "include"]
            .into_iter()
            .map(BucketName::from)
            .collect();

        assert!(names.contains("api"));
        assert!(!names.contains("apiElements"));

        let text: Vec<_> = names.iter().map(|n| n.as_str()).collect();
        assert_eq!(text, vec!["api", "include", "runtimeClasspath"]);
    }
}
