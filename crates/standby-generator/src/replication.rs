//! Standby task replication
//!
//! Turns one active container's task set into the standby task set hosted
//! by one of its buddy containers.

use crate::naming::{derive_standby_task_name, ReplicaIndex};
use standby_model::{TaskModel, TaskName};
use std::collections::BTreeMap;

/// Replicate every active task as a standby task for `replica`
///
/// Each output model keeps the partitions and change-log partition of its
/// source, takes the derived standby name and carries the standby role.
/// Output size always equals input size.
#[must_use]
pub fn replicate_tasks(
    active_tasks: &BTreeMap<TaskName, TaskModel>,
    replica: ReplicaIndex,
) -> BTreeMap<TaskName, TaskModel> {
    active_tasks
        .values()
        .map(|active| {
            let name = derive_standby_task_name(active.name(), replica).to_task_name();
            (name.clone(), active.standby_copy(name))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use standby_model::{ChangelogPartition, ContainerModel, Partition, TaskRole};

    fn active_tasks() -> BTreeMap<TaskName, TaskModel> {
        ContainerModel::from_tasks(
            "0",
            [
                TaskModel::active(
                    "Partition 0",
                    [Partition::new("kafka", "clicks", 0)],
                    ChangelogPartition::new(0),
                ),
                TaskModel::active(
                    "Partition 1",
                    [Partition::new("kafka", "clicks", 1), Partition::new("kafka", "views", 1)],
                    ChangelogPartition::new(1),
                ),
            ],
        )
        .unwrap()
        .tasks()
        .clone()
    }

    #[test]
    fn replicates_every_task() {
        let active = active_tasks();
        let standby = replicate_tasks(&active, ReplicaIndex::new(0));

        assert_eq!(standby.len(), active.len());
        assert!(standby.contains_key("Standby Partition 0-0"));
        assert!(standby.contains_key("Standby Partition 1-0"));
    }

    #[test]
    fn standby_mirrors_assignment() {
        let active = active_tasks();
        let standby = replicate_tasks(&active, ReplicaIndex::new(3));

        let source = &active["Partition 1"];
        let copy = &standby["Standby Partition 1-3"];
        assert_eq!(copy.partitions(), source.partitions());
        assert_eq!(copy.changelog_partition(), source.changelog_partition());
        assert_eq!(copy.role(), TaskRole::Standby);
        assert_eq!(copy.name().as_str(), "Standby Partition 1-3");
    }

    #[test]
    fn keys_match_names() {
        let standby = replicate_tasks(&active_tasks(), ReplicaIndex::new(1));
        assert!(standby.iter().all(|(key, model)| key == model.name()));
    }

    #[test]
    fn empty_input() {
        let standby = replicate_tasks(&BTreeMap::new(), ReplicaIndex::new(0));
        assert!(standby.is_empty());
    }

    #[test]
    fn source_is_untouched() {
        let active = active_tasks();
        let before = active.clone();
        let _ = replicate_tasks(&active, ReplicaIndex::new(0));
        assert_eq!(active, before);
    }
}
