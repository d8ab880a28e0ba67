//! Tasks registered on the host project.
//!
//! Every task kind here copies files, so each one carries the charset used
//! when filtering file contents.

use std::collections::BTreeMap;

use crate::core::names::tasks;

/// What a task produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskKind {
    /// Copies resources into the compiled output.
    ProcessResources,
    /// Packages compiled output.
    Jar,
    /// Remaps the output of another task.
    RemapJar { input: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub name: String,
    pub kind: TaskKind,
    /// `None` leaves the platform default in place.
    pub filtering_charset: Option<String>,
}

impl Task {
    fn new(name: &str, kind: TaskKind) -> Self {
        Task {
            name: name.to_string(),
            kind,
            filtering_charset: None,
        }
    }

    pub fn process_resources() -> Self {
        Task::new(tasks::PROCESS_RESOURCES, TaskKind::ProcessResources)
    }

    pub fn jar() -> Self {
        Task::new(tasks::JAR, TaskKind::Jar)
    }

    pub fn remap_jar(input: impl Into<String>) -> Self {
        Task::new(
            tasks::REMAP_JAR,
            TaskKind::RemapJar {
                input: input.into(),
            },
        )
    }
}

/// Tasks by name.
#[derive(Debug, Clone, Default)]
pub struct TaskContainer {
    tasks: BTreeMap<String, Task>,
    filtering_charset: Option<String>,
}

impl TaskContainer {
    /// Register a task, replacing any task with the same name.
    ///
    /// A charset set through [`TaskContainer::set_filtering_charset`] is
    /// applied to the new task as well.
    pub fn register(&mut self, mut task: Task) {
        if let Some(charset) = &self.filtering_charset {
            task.filtering_charset = Some(charset.clone());
        }
        self.tasks.insert(task.name.clone(), task);
    }

    /// Force `charset` on every task, including tasks registered later.
    pub fn set_filtering_charset(&mut self, charset: &str) {
        for task in self.tasks.values_mut() {
            task.filtering_charset = Some(charset.to_string());
        }
        self.filtering_charset = Some(charset.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&Task> {
        self.tasks.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tasks.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charset_reaches_later_tasks() {
        let mut tasks = TaskContainer::default();
        tasks.register(Task::jar());
        assert_eq!(tasks.get("jar").unwrap().filtering_charset, None);

        tasks.set_filtering_charset("UTF-8");
        tasks.register(Task::remap_jar("jar"));

        for name in ["jar", "remapJar"] {
            assert_eq!(
                tasks.get(name).unwrap().filtering_charset.as_deref(),
                Some("UTF-8")
            );
        }
    }
}
