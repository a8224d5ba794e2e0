//! Layout merge with collision detection
//!
//! Combines generated buddy containers with the active layout. Any derived
//! id that coincides with an id already in the layout is a hard error;
//! there is no overwrite precedence in either direction.

use crate::buddy::BuddyContainer;
use crate::error::{CollisionKind, GenerationError, NamingCollision};
use crate::naming::StandbyTaskName;
use standby_model::{ContainerId, ContainerLayout, TaskName};
use std::collections::HashMap;

/// Incremental merge of buddy containers into a copy of an active layout
///
/// Each pushed buddy is checked against the active containers and against
/// every buddy pushed before it, so a collision is reported as soon as the
/// offending buddy arrives.
#[derive(Debug, Clone)]
pub struct LayoutMerge {
    merged: ContainerLayout,
    task_owners: HashMap<TaskName, ContainerId>,
}

impl LayoutMerge {
    /// Start a merge from a copy of `active`
    #[must_use]
    pub fn new(active: &ContainerLayout) -> Self {
        let task_owners = active
            .iter()
            .flat_map(|(id, c)| c.tasks().keys().map(move |name| (name.clone(), id.clone())))
            .collect();
        Self {
            merged: active.clone(),
            task_owners,
        }
    }

    /// Add one buddy container
    ///
    /// # Errors
    /// Returns [`GenerationError::NamingCollision`] when the buddy container
    /// id equals an existing container id, or one of its standby task names
    /// equals a task name already present anywhere in the layout. The merge
    /// is left as it was before the call.
    pub fn push(&mut self, buddy: BuddyContainer) -> Result<(), GenerationError> {
        let container_id = buddy.model().id().clone();

        if self.merged.contains(container_id.as_str()) {
            return Err(GenerationError::collision(NamingCollision {
                kind: CollisionKind::Container,
                derived: container_id.to_string(),
                derived_from: buddy.id().active().to_string(),
                replica: buddy.id().replica(),
                existing: container_id.to_string(),
                existing_owner: container_id.to_string(),
            }));
        }

        for name in buddy.model().tasks().keys() {
            if let Some(owner) = self.task_owners.get(name) {
                let derived_from = StandbyTaskName::parse(name.as_str())
                    .map_or_else(|| name.to_string(), |parsed| parsed.active().to_string());
                return Err(GenerationError::collision(NamingCollision {
                    kind: CollisionKind::Task,
                    derived: name.to_string(),
                    derived_from,
                    replica: buddy.id().replica(),
                    existing: name.to_string(),
                    existing_owner: owner.to_string(),
                }));
            }
        }

        for name in buddy.model().tasks().keys() {
            self.task_owners.insert(name.clone(), container_id.clone());
        }
        self.merged.try_insert(buddy.into_model())?;
        Ok(())
    }

    /// Finish the merge
    #[inline]
    #[must_use]
    pub fn finish(self) -> ContainerLayout {
        self.merged
    }
}

/// Merge buddy containers into a copy of `active`
///
/// `active` is left untouched. Stops at the first collision without
/// pulling further buddies from `buddies`.
///
/// # Errors
/// Returns [`GenerationError::NamingCollision`] on the first colliding
/// container id or standby task name
pub fn merge(
    active: &ContainerLayout,
    buddies: impl IntoIterator<Item = BuddyContainer>,
) -> Result<ContainerLayout, GenerationError> {
    let mut merge = LayoutMerge::new(active);
    for buddy in buddies {
        merge.push(buddy)?;
    }
    Ok(merge.finish())
}
