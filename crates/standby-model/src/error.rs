//! Error types for the job model

/// Job model construction and decoding errors
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Two containers share an id
    #[error("duplicate container id: {0}")]
    DuplicateContainer(String),

    /// Two tasks in one container share a name
    #[error("duplicate task {task} in container {container}")]
    DuplicateTask {
        /// Container holding the duplicate
        container: String,
        /// Duplicated task name
        task: String,
    },

    /// Layout key differs from the container model's own id
    #[error("layout key {key} does not match container id {id}")]
    ContainerKeyMismatch {
        /// Key in the layout map
        key: String,
        /// Id carried by the model
        id: String,
    },

    /// Task map key differs from the task model's own name
    #[error("task key {key} in container {container} does not match task name {task}")]
    TaskKeyMismatch {
        /// Container holding the task
        container: String,
        /// Key in the task map
        key: String,
        /// Name carried by the model
        task: String,
    },

    /// A container model failed to encode or decode
    #[error("container {container}: {source}")]
    Serialization {
        /// Container being encoded or decoded
        container: String,
        /// Underlying JSON error
        source: serde_json::Error,
    },
}

impl ModelError {
    /// Create serialization error for a container
    #[inline]
    #[must_use]
    pub fn serialization(container: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            container: container.into(),
            source,
        }
    }
}
