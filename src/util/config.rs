//! Configuration file support.
//!
//! Two locations are read:
//! - Global: `~/.modweave/config.toml` - user-wide defaults
//! - Project: `.modweave/config.toml` - project-specific overrides
//!
//! Project config takes precedence over global config.
//!
//! ```toml
//! [remap]
//! archives = true
//!
//! [mixin]
//! legacy-ap = true
//! refmap-name = "examplemod-refmap.json"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Subsystem configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Packaged output settings
    pub remap: RemapConfig,

    /// Code generation settings
    pub mixin: MixinConfig,
}

/// Packaged output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RemapConfig {
    /// Remap the packaged output. Turn off for projects that only consume
    /// mods and are not mods themselves.
    pub archives: bool,
}

impl Default for RemapConfig {
    fn default() -> Self {
        RemapConfig { archives: true }
    }
}

/// Code generation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct MixinConfig {
    /// Configure code generation through annotation processors
    pub legacy_ap: bool,

    /// Refmap file name
    pub refmap_name: Option<String>,
}

impl Default for MixinConfig {
    fn default() -> Self {
        MixinConfig {
            legacy_ap: true,
            refmap_name: None,
        }
    }
}

/// Config values as written in one file, before merging.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct PartialConfig {
    remap: PartialRemap,
    mixin: PartialMixin,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
struct PartialRemap {
    archives: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
struct PartialMixin {
    legacy_ap: Option<bool>,
    refmap_name: Option<String>,
}

impl Config {
    /// Load configuration from a single file.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = Config::default();
        config.merge(read_partial(path)?);
        Ok(config)
    }

    /// Apply the values set in `other`. Unset values are left alone.
    fn merge(&mut self, other: PartialConfig) {
        if let Some(archives) = other.remap.archives {
            self.remap.archives = archives;
        }
        if let Some(legacy_ap) = other.mixin.legacy_ap {
            self.mixin.legacy_ap = legacy_ap;
        }
        if other.mixin.refmap_name.is_some() {
            self.mixin.refmap_name = other.mixin.refmap_name;
        }
    }
}

fn read_partial(path: &Path) -> Result<PartialConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;

    toml::from_str(&contents)
        .with_context(|| format!("failed to parse config: {}", path.display()))
}

fn read_partial_or_default(path: &Path) -> PartialConfig {
    if !path.exists() {
        return PartialConfig::default();
    }

    read_partial(path).unwrap_or_else(|e| {
        tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
        PartialConfig::default()
    })
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.modweave/config.toml)
/// 2. Global config (~/.modweave/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global) = global_path {
        config.merge(read_partial_or_default(global));
    }

    config.merge(read_partial_or_default(project_path));

    config
}

/// Load configuration for the project rooted at `project_root`.
pub fn load_project_config(project_root: &Path) -> Config {
    let global = global_config_path();
    load_config(global.as_deref(), &project_config_path(project_root))
}

/// Get the global config directory (~/.modweave).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".modweave"))
}

/// Get the global config path (~/.modweave/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.modweave/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".modweave").join("config.toml")
}
