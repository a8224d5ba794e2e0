//! Task names and task models

use crate::partition::{ChangelogPartition, Partition};
use crate::role::TaskRole;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};

/// Unique name of one task instance within a job
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskName(String);

impl TaskName {
    /// Create new task name
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the name as a string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the underlying string
    #[inline]
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl Display for TaskName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for TaskName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TaskName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for TaskName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Assignment of one task instance
///
/// Immutable once built. A standby model derived through
/// [`TaskModel::standby_copy`] shares partitions and change log with its
/// source and differs only in name and role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TaskModel {
    task_name: TaskName,
    partitions: BTreeSet<Partition>,
    changelog_partition: ChangelogPartition,
    #[serde(default)]
    role: TaskRole,
}

impl TaskModel {
    /// Create new task model
    #[must_use]
    pub fn new(
        task_name: impl Into<TaskName>,
        partitions: BTreeSet<Partition>,
        changelog_partition: ChangelogPartition,
        role: TaskRole,
    ) -> Self {
        Self {
            task_name: task_name.into(),
            partitions,
            changelog_partition,
            role,
        }
    }

    /// Create active task model
    #[must_use]
    pub fn active(
        task_name: impl Into<TaskName>,
        partitions: impl IntoIterator<Item = Partition>,
        changelog_partition: ChangelogPartition,
    ) -> Self {
        Self::new(
            task_name,
            partitions.into_iter().collect(),
            changelog_partition,
            TaskRole::Active,
        )
    }

    /// Copy this model into a standby model with the given name
    ///
    /// The copy owns its own partition set; nothing is shared with `self`.
    #[must_use]
    pub fn standby_copy(&self, standby_name: TaskName) -> Self {
        Self {
            task_name: standby_name,
            partitions: self.partitions.clone(),
            changelog_partition: self.changelog_partition,
            role: TaskRole::Standby,
        }
    }

    /// Task name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &TaskName {
        &self.task_name
    }

    /// Input partitions consumed by this task
    #[inline]
    #[must_use]
    pub fn partitions(&self) -> &BTreeSet<Partition> {
        &self.partitions
    }

    /// Change-log partition backing this task's stores
    #[inline]
    #[must_use]
    pub fn changelog_partition(&self) -> ChangelogPartition {
        self.changelog_partition
    }

    /// Task role
    #[inline]
    #[must_use]
    pub fn role(&self) -> TaskRole {
        self.role
    }
}
