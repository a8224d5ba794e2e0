//! Buddy containers
//!
//! A buddy container hosts one standby replica of every task of a single
//! active container.

use crate::error::GenerationError;
use crate::naming::{derive_container_id, BuddyContainerId, ReplicaIndex};
use crate::replication::replicate_tasks;
use standby_model::{ContainerLayout, ContainerModel};

/// A generated buddy container together with its typed id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuddyContainer {
    id: BuddyContainerId,
    model: ContainerModel,
}

impl BuddyContainer {
    /// Derive the buddy of `active` for `replica`
    ///
    /// # Errors
    /// Propagates [`GenerationError::Model`] if the replicated task map is
    /// rejected by the job model
    pub fn derive(active: &ContainerModel, replica: ReplicaIndex) -> Result<Self, GenerationError> {
        let id = derive_container_id(active.id(), replica);
        let tasks = replicate_tasks(active.tasks(), replica);
        let model = ContainerModel::new(id.to_container_id(), tasks)?;
        Ok(Self { id, model })
    }

    /// Typed id
    #[inline]
    #[must_use]
    pub fn id(&self) -> &BuddyContainerId {
        &self.id
    }

    /// Container model with legacy string id
    #[inline]
    #[must_use]
    pub fn model(&self) -> &ContainerModel {
        &self.model
    }

    /// Consume into the container model
    #[inline]
    #[must_use]
    pub fn into_model(self) -> ContainerModel {
        self.model
    }
}

/// Find the buddy containers of `active_id` in an expanded layout
///
/// `active` is the layout the expansion started from. A container counts
/// as a buddy only if its id parses as `<active_id>-<replica>` and it is
/// not itself one of the active containers; contents are not consulted,
/// so empty containers are classified like any other. Results are ordered
/// by replica index.
#[must_use]
pub fn buddies_of<'a>(
    expanded: &'a ContainerLayout,
    active: &ContainerLayout,
    active_id: &str,
) -> Vec<(ReplicaIndex, &'a ContainerModel)> {
    if !active.contains(active_id) {
        return Vec::new();
    }

    let mut found: Vec<_> = expanded
        .iter()
        .filter(|(id, _)| !active.contains(id.as_str()))
        .filter_map(|(id, container)| {
            let parsed = BuddyContainerId::parse(id.as_str())?;
            (parsed.active().as_str() == active_id).then_some((parsed.replica(), container))
        })
        .collect();
    found.sort_by_key(|(replica, _)| *replica);
    found
}
