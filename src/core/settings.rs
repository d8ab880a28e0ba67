//! Project-level switches.
//!
//! A switch can be changed while the build script runs. Once orchestration
//! reads it the value is frozen, so later writes fail instead of being
//! silently ignored.

use thiserror::Error;

use crate::util::config::Config;
use crate::util::diagnostic::Diagnostic;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("`{name}` cannot be changed after it has been read")]
    Finalized { name: &'static str },
}

impl SettingsError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            SettingsError::Finalized { name } => Diagnostic::error(self.to_string())
                .with_context(format!(
                    "`{}` was frozen when the plugin read it during evaluation",
                    name
                ))
                .with_suggestion("Set the value in the build script before the project is evaluated")
                .with_suggestion(format!("Or set `{}` in .modweave/config.toml", name)),
        }
    }
}

/// A boolean that can be frozen.
#[derive(Debug, Clone)]
pub struct Switch {
    name: &'static str,
    value: bool,
    finalized: bool,
}

impl Switch {
    pub fn new(name: &'static str, value: bool) -> Self {
        Switch {
            name,
            value,
            finalized: false,
        }
    }

    pub fn get(&self) -> bool {
        self.value
    }

    pub fn set(&mut self, value: bool) -> Result<(), SettingsError> {
        if self.finalized {
            return Err(SettingsError::Finalized { name: self.name });
        }
        self.value = value;
        Ok(())
    }

    /// Freeze the switch and return its value.
    pub fn finalize_value(&mut self) -> bool {
        self.finalized = true;
        self.value
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }
}

/// Settings the user can change from the build script.
#[derive(Debug, Clone)]
pub struct ModSettings {
    /// Remap packaged output back to obfuscated names.
    pub remap_archives: Switch,

    /// Configure mixin code generation through annotation processors.
    pub legacy_mixin_ap: Switch,

    /// Refmap file name; defaults to `<project>-refmap.json`.
    pub refmap_name: Option<String>,
}

impl ModSettings {
    pub fn from_config(config: &Config) -> Self {
        ModSettings {
            remap_archives: Switch::new("remap.archives", config.remap.archives),
            legacy_mixin_ap: Switch::new("mixin.legacy-ap", config.mixin.legacy_ap),
            refmap_name: config.mixin.refmap_name.clone(),
        }
    }
}

impl Default for ModSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switch_freezes() {
        let mut switch = Switch::new("remap.archives", true);
        switch.set(false).unwrap();

        assert!(!switch.finalize_value());
        assert!(switch.is_finalized());

        let err = switch.set(true).unwrap_err();
        assert_eq!(
            err.to_string(),
            "`remap.archives` cannot be changed after it has been read"
        );
        assert!(!switch.get());
    }

    #[test]
    fn test_finalized_diagnostic() {
        let mut switch = Switch::new("mixin.legacy-ap", true);
        switch.finalize_value();

        let output = switch.set(false).unwrap_err().to_diagnostic().format(false);
        assert!(output.starts_with("error: `mixin.legacy-ap` cannot be changed"));
        assert!(output.contains("-> `mixin.legacy-ap` was frozen"));
        assert!(output.contains("2. Or set `mixin.legacy-ap` in .modweave/config.toml"));
    }

    #[test]
    fn test_defaults() {
        let settings = ModSettings::default();
        assert!(settings.remap_archives.get());
        assert!(settings.legacy_mixin_ap.get());
        assert!(settings.refmap_name.is_none());
    }
}
