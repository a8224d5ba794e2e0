//! Active layout validation
//!
//! Checks run before any buddy is derived, so a bad upstream layout is
//! rejected instead of being replicated.

use crate::error::GenerationError;
use crate::naming::is_reserved_task_name;
use standby_model::{ContainerId, ContainerLayout, TaskName};
use std::collections::HashMap;

/// Validate that `layout` is a purely active assignment
///
/// # Errors
/// - [`GenerationError::InvalidLayout`] if a task is not active, or a task
///   name appears in more than one container
/// - [`GenerationError::ReservedName`] if an active task name starts with
///   the standby marker
pub fn validate_active_layout(layout: &ContainerLayout) -> Result<(), GenerationError> {
    let mut owners: HashMap<&TaskName, &ContainerId> = HashMap::with_capacity(layout.task_count());

    for (container_id, container) in layout {
        for (name, task) in container.tasks() {
            if !task.role().is_active() {
                return Err(GenerationError::InvalidLayout(format!(
                    "task {name} in container {container_id} has role {}, expected active",
                    task.role()
                )));
            }

            if is_reserved_task_name(name) {
                return Err(GenerationError::ReservedName {
                    container: container_id.to_string(),
                    task: name.to_string(),
                });
            }

            if let Some(first) = owners.insert(name, container_id) {
                return Err(GenerationError::InvalidLayout(format!(
                    "task {name} is assigned to both container {first} and container {container_id}"
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use standby_model::{
        ChangelogPartition, ContainerModel, Partition, TaskModel, TaskRole,
    };

    fn task(name: &str, role: TaskRole) -> TaskModel {
        TaskModel::new(
            name,
            [Partition::new("kafka", "s", 0)].into_iter().collect(),
            ChangelogPartition::new(0),
            role,
        )
    }

    fn layout(containers: Vec<(&str, Vec<TaskModel>)>) -> ContainerLayout {
        ContainerLayout::from_containers(
            containers
                .into_iter()
                .map(|(id, tasks)| ContainerModel::from_tasks(id, tasks).unwrap()),
        )
        .unwrap()
    }

    #[test]
    fn accepts_active_layout() {
        let l = layout(vec![
            ("0", vec![task("Partition 0", TaskRole::Active)]),
            ("1", vec![task("Partition 1", TaskRole::Active)]),
        ]);
        assert!(validate_active_layout(&l).is_ok());
    }

    #[test]
    fn accepts_empty_layout_and_containers() {
        assert!(validate_active_layout(&ContainerLayout::new()).is_ok());
        assert!(validate_active_layout(&layout(vec![("0", vec![])])).is_ok());
    }

    #[test]
    fn rejects_standby_input() {
        let l = layout(vec![("0", vec![task("Partition 0", TaskRole::Standby)])]);
        let err = validate_active_layout(&l).unwrap_err();
        assert!(matches!(err, GenerationError::InvalidLayout(msg) if msg.contains("standbyState")));
    }

    #[test]
    fn rejects_reserved_prefix() {
        let l = layout(vec![("0", vec![task("Standby Partition 0-0", TaskRole::Active)])]);
        let err = validate_active_layout(&l).unwrap_err();
        assert!(matches!(err, GenerationError::ReservedName { .. }));
    }

    #[test]
    fn rejects_task_in_two_containers() {
        let l = layout(vec![
            ("0", vec![task("Partition 0", TaskRole::Active)]),
            ("1", vec![task("Partition 0", TaskRole::Active)]),
        ]);
        let err = validate_active_layout(&l).unwrap_err();
        assert!(matches!(err, GenerationError::InvalidLayout(msg) if msg.contains("both")));
    }
}
