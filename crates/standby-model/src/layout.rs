//! Container layouts
//!
//! Provides [`ContainerLayout`], the full container-to-task assignment of
//! one job generation, and its boundary encodings.

use crate::container::{ContainerId, ContainerModel};
use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};

/// Full job assignment keyed by container id
///
/// Container ids are unique and every key equals the id of the model it
/// maps to. Serializes as a JSON object keyed by container id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<ContainerId, ContainerModel>",
    into = "BTreeMap<ContainerId, ContainerModel>"
)]
pub struct ContainerLayout {
    containers: BTreeMap<ContainerId, ContainerModel>,
}

impl ContainerLayout {
    /// Create new empty layout
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build layout keyed by each container's own id
    ///
    /// # Errors
    /// Returns [`ModelError::DuplicateContainer`] if two containers share an id
    pub fn from_containers(
        containers: impl IntoIterator<Item = ContainerModel>,
    ) -> Result<Self, ModelError> {
        let mut layout = Self::new();
        for container in containers {
            layout.try_insert(container)?;
        }
        Ok(layout)
    }

    /// Insert a container that is not yet present
    ///
    /// # Errors
    /// Returns [`ModelError::DuplicateContainer`] if the id is taken; the
    /// existing container is left untouched
    pub fn try_insert(&mut self, container: ContainerModel) -> Result<(), ModelError> {
        match self.containers.entry(container.id().clone()) {
            btree_map::Entry::Occupied(entry) => {
                Err(ModelError::DuplicateContainer(entry.key().to_string()))
            }
            btree_map::Entry::Vacant(entry) => {
                entry.insert(container);
                Ok(())
            }
        }
    }

    /// Look up a container by id
    #[inline]
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ContainerModel> {
        self.containers.get(id)
    }

    /// Check if a container id is present
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.containers.contains_key(id)
    }

    /// Number of containers
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.containers.len()
    }

    /// Check if layout has no containers
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    /// Iterate over `(id, container)` pairs in id order
    #[inline]
    pub fn iter(&self) -> btree_map::Iter<'_, ContainerId, ContainerModel> {
        self.containers.iter()
    }

    /// Iterate over container ids
    #[inline]
    pub fn ids(&self) -> impl Iterator<Item = &ContainerId> {
        self.containers.keys()
    }

    /// Iterate over containers whose tasks are all active
    ///
    /// Empty containers are skipped: with no task there is no role to go
    /// by, so an empty active container and an empty buddy look the same.
    /// Callers that know where containers came from should classify them
    /// by id instead.
    pub fn active_containers(&self) -> impl Iterator<Item = &ContainerModel> {
        self.containers
            .values()
            .filter(|c| !c.is_empty() && !c.has_standby_tasks())
    }

    /// Total number of tasks across all containers
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.containers.values().map(ContainerModel::len).sum()
    }

    /// Number of standby tasks across all containers
    #[must_use]
    pub fn standby_task_count(&self) -> usize {
        self.containers
            .values()
            .flat_map(|c| c.tasks().values())
            .filter(|t| t.role().is_standby())
            .count()
    }

    /// Consume into the underlying map
    #[inline]
    #[must_use]
    pub fn into_map(self) -> BTreeMap<ContainerId, ContainerModel> {
        self.containers
    }

    /// Encode each container model as its own JSON string, keyed by id
    ///
    /// This is the form a diagnostics stream embeds per container.
    ///
    /// # Errors
    /// Returns [`ModelError::Serialization`] naming the container that failed
    pub fn to_serialized_models(&self) -> Result<BTreeMap<String, String>, ModelError> {
        self.containers
            .iter()
            .map(|(id, model)| {
                serde_json::to_string(model)
                    .map(|json| (id.to_string(), json))
                    .map_err(|e| ModelError::serialization(id.as_str(), e))
            })
            .collect()
    }

    /// Decode a map of per-container JSON strings
    ///
    /// Every entry must decode; nothing is dropped silently.
    ///
    /// # Errors
    /// Returns [`ModelError::Serialization`] for an undecodable entry, or
    /// [`ModelError::ContainerKeyMismatch`] if a key differs from the decoded id
    pub fn from_serialized_models(
        serialized: &BTreeMap<String, String>,
    ) -> Result<Self, ModelError> {
        let mut containers = BTreeMap::new();
        for (key, json) in serialized {
            let model: ContainerModel =
                serde_json::from_str(json).map_err(|e| ModelError::serialization(key.as_str(), e))?;
            containers.insert(ContainerId::new(key.as_str()), model);
        }
        Self::try_from(containers)
    }
}

impl TryFrom<BTreeMap<ContainerId, ContainerModel>> for ContainerLayout {
    type Error = ModelError;

    fn try_from(containers: BTreeMap<ContainerId, ContainerModel>) -> Result<Self, Self::Error> {
        if let Some((key, model)) = containers.iter().find(|(key, model)| *key != model.id()) {
            return Err(ModelError::ContainerKeyMismatch {
                key: key.to_string(),
                id: model.id().to_string(),
            });
        }
        Ok(Self { containers })
    }
}

impl From<ContainerLayout> for BTreeMap<ContainerId, ContainerModel> {
    fn from(layout: ContainerLayout) -> Self {
        layout.containers
    }
}

impl<'a> IntoIterator for &'a ContainerLayout {
    type Item = (&'a ContainerId, &'a ContainerModel);
    type IntoIter = btree_map::Iter<'a, ContainerId, ContainerModel>;

    fn into_iter(self) -> Self::IntoIter {
        self.containers.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::{ChangelogPartition, Partition};
    use crate::task::{TaskModel, TaskName};
    use pretty_assertions::assert_eq;

    fn container(id: &str, tasks: &[(&str, u32)]) -> ContainerModel {
        ContainerModel::from_tasks(
            id,
            tasks.iter().map(|(name, p)| {
                TaskModel::active(
                    *name,
                    [Partition::new("kafka", "s", *p)],
                    ChangelogPartition::new(*p),
                )
            }),
        )
        .unwrap()
    }

    fn sample() -> ContainerLayout {
        ContainerLayout::from_containers([
            container("0", &[("Partition 0", 0), ("Partition 1", 1)]),
            container("1", &[("Partition 2", 2)]),
        ])
        .unwrap()
    }

    #[test]
    fn from_containers_rejects_duplicate_ids() {
        let err = ContainerLayout::from_containers([container("0", &[]), container("0", &[])])
            .unwrap_err();
        assert!(matches!(err, ModelError::DuplicateContainer(id) if id == "0"));
    }

    #[test]
    fn try_insert_keeps_existing() {
        let mut layout = sample();
        let err = layout.try_insert(ContainerModel::empty("0")).unwrap_err();
        assert!(matches!(err, ModelError::DuplicateContainer(_)));
        assert_eq!(layout.get("0").map(ContainerModel::len), Some(2));
    }

    #[test]
    fn counts() {
        let layout = sample();
        assert_eq!(layout.len(), 2);
        assert_eq!(layout.task_count(), 3);
        assert_eq!(layout.standby_task_count(), 0);
        assert_eq!(layout.active_containers().count(), 2);
    }

    #[test]
    fn standby_containers_are_not_active() {
        let mut layout = sample();
        let source = layout.get("0").unwrap().task("Partition 0").unwrap().clone();
        let standby = source.standby_copy(TaskName::new("Standby Partition 0-0"));
        layout
            .try_insert(ContainerModel::from_tasks("0-0", [standby]).unwrap())
            .unwrap();

        assert_eq!(layout.standby_task_count(), 1);
        assert_eq!(layout.active_containers().count(), 2);
    }

    #[test]
    fn json_is_keyed_by_container_id() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("0").is_some());
        assert_eq!(json["1"]["id"], "1");

        let back: ContainerLayout = serde_json::from_value(json).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn json_rejects_key_mismatch() {
        let json = r#"{"a": {"id": "b", "tasks": {}}}"#;
        assert!(serde_json::from_str::<ContainerLayout>(json).is_err());
    }

    #[test]
    fn serialized_models_report_bad_entry() {
        let mut serialized = sample().to_serialized_models().unwrap();
        serialized.insert("broken".to_string(), "{not json".to_string());

        let err = ContainerLayout::from_serialized_models(&serialized).unwrap_err();
        assert!(
            matches!(err, ModelError::Serialization { container, .. } if container == "broken")
        );
    }

    #[test]
    fn serialized_models_reject_key_mismatch() {
        let mut serialized = BTreeMap::new();
        serialized.insert(
            "x".to_string(),
            serde_json::to_string(&ContainerModel::empty("y")).unwrap(),
        );

        let err = ContainerLayout::from_serialized_models(&serialized).unwrap_err();
        assert!(matches!(err, ModelError::ContainerKeyMismatch { .. }));
    }

    #[test]
    fn empty_containers_are_not_classified_as_active() {
        let mut layout = sample();
        layout.try_insert(ContainerModel::empty("2")).unwrap();
        layout.try_insert(ContainerModel::empty("2-0")).unwrap();

        let ids: Vec<&str> = layout.active_containers().map(|c| c.id().as_str()).collect();
        assert_eq!(ids, vec!["0", "1"]);
    }
}
