//! Applied plugins, in application order.

/// The host's plugin registry for one project.
#[derive(Debug, Clone, Default)]
pub struct PluginSet {
    applied: Vec<String>,
}

impl PluginSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a plugin. Returns false if it was already applied.
    pub fn apply(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.has_plugin(&id) {
            return false;
        }
        self.applied.push(id);
        true
    }

    pub fn has_plugin(&self, id: &str) -> bool {
        self.applied.iter().any(|p| p == id)
    }
}
