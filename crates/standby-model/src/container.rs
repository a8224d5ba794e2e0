//! Container identifiers and container models

use crate::error::ModelError;
use crate::task::{TaskModel, TaskName};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

/// Globally unique container identifier within a job
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContainerId(String);

impl ContainerId {
    /// Create new container id
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ContainerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ContainerId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ContainerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ContainerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A container and the tasks assigned to it
///
/// Every key in `tasks` equals the name of the model it maps to; the
/// constructors and the deserializer reject anything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawContainerModel")]
pub struct ContainerModel {
    id: ContainerId,
    tasks: BTreeMap<TaskName, TaskModel>,
}

#[derive(Deserialize)]
struct RawContainerModel {
    id: ContainerId,
    #[serde(default)]
    tasks: BTreeMap<TaskName, TaskModel>,
}

impl TryFrom<RawContainerModel> for ContainerModel {
    type Error = ModelError;

    fn try_from(raw: RawContainerModel) -> Result<Self, Self::Error> {
        Self::new(raw.id, raw.tasks)
    }
}

impl ContainerModel {
    /// Create container model from a task map
    ///
    /// # Errors
    /// Returns [`ModelError::TaskKeyMismatch`] if a key differs from its
    /// model's task name
    pub fn new(
        id: impl Into<ContainerId>,
        tasks: BTreeMap<TaskName, TaskModel>,
    ) -> Result<Self, ModelError> {
        let id = id.into();
        if let Some((key, model)) = tasks.iter().find(|(key, model)| *key != model.name()) {
            return Err(ModelError::TaskKeyMismatch {
                container: id.to_string(),
                key: key.to_string(),
                task: model.name().to_string(),
            });
        }
        Ok(Self { id, tasks })
    }

    /// Create container model keyed by each task's own name
    ///
    /// # Errors
    /// Returns [`ModelError::DuplicateTask`] if two tasks share a name
    pub fn from_tasks(
        id: impl Into<ContainerId>,
        tasks: impl IntoIterator<Item = TaskModel>,
    ) -> Result<Self, ModelError> {
        let id = id.into();
        let mut map = BTreeMap::new();
        for task in tasks {
            let name = task.name().clone();
            if map.insert(name.clone(), task).is_some() {
                return Err(ModelError::DuplicateTask {
                    container: id.to_string(),
                    task: name.to_string(),
                });
            }
        }
        Ok(Self { id, tasks: map })
    }

    /// Container with no tasks
    #[inline]
    #[must_use]
    pub fn empty(id: impl Into<ContainerId>) -> Self {
        Self {
            id: id.into(),
            tasks: BTreeMap::new(),
        }
    }

    /// Container id
    #[inline]
    #[must_use]
    pub fn id(&self) -> &ContainerId {
        &self.id
    }

    /// Tasks keyed by name
    #[inline]
    #[must_use]
    pub fn tasks(&self) -> &BTreeMap<TaskName, TaskModel> {
        &self.tasks
    }

    /// Look up a task by name
    #[inline]
    #[must_use]
    pub fn task(&self, name: &str) -> Option<&TaskModel> {
        self.tasks.get(name)
    }

    /// Number of tasks
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Check if container has no tasks
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Check if any task in this container is a standby
    #[inline]
    #[must_use]
    pub fn has_standby_tasks(&self) -> bool {
        self.tasks.values().any(|t| t.role().is_standby())
    }
}
