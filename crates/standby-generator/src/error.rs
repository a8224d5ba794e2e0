//! Error types for standby generation
//!
//! Covers:
//! - Invalid replication factor (configuration error)
//! - Derived ids colliding with existing ones
//! - Input layouts that are not purely active

use crate::naming::ReplicaIndex;
use standby_model::ModelError;
use std::fmt::{self, Display, Formatter};

/// Standby generation error
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// Replication factor below 1
    #[error("configuration error: replication factor must be at least 1, got {replication_factor}")]
    Configuration {
        /// Rejected factor
        replication_factor: i64,
    },

    /// A derived id coincides with an existing one
    #[error("naming collision: {0}")]
    NamingCollision(Box<NamingCollision>),

    /// Input layout violates an active-layout invariant
    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    /// Active task uses the reserved standby marker
    #[error("task {task} in container {container} uses the reserved standby prefix")]
    ReservedName {
        /// Container holding the task
        container: String,
        /// Offending task name
        task: String,
    },

    /// Job model rejected an operation
    #[error("model error: {0}")]
    Model(#[from] ModelError),
}

impl GenerationError {
    /// Create configuration error for a rejected factor
    #[inline]
    #[must_use]
    pub fn configuration(replication_factor: impl Into<i64>) -> Self {
        Self::Configuration {
            replication_factor: replication_factor.into(),
        }
    }

    /// Create naming collision error
    #[inline]
    #[must_use]
    pub fn collision(collision: NamingCollision) -> Self {
        Self::NamingCollision(Box::new(collision))
    }

    /// Check if error is a configuration error
    #[inline]
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }

    /// Check if error is a naming collision
    #[inline]
    #[must_use]
    pub fn is_collision(&self) -> bool {
        matches!(self, Self::NamingCollision(_))
    }

    /// Collision details, if this is a naming collision
    #[inline]
    #[must_use]
    pub fn as_collision(&self) -> Option<&NamingCollision> {
        match self {
            Self::NamingCollision(c) => Some(c),
            _ => None,
        }
    }
}

/// Which namespace a collision happened in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    /// Buddy container id vs existing container id
    Container,

    /// Standby task name vs existing task name
    Task,
}

/// Both sides of a naming collision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingCollision {
    /// Namespace of the collision
    pub kind: CollisionKind,

    /// Derived id, legacy string form
    pub derived: String,

    /// Active container or task the derived id was built from
    pub derived_from: String,

    /// Replica index used for the derivation
    pub replica: ReplicaIndex,

    /// Existing id the derived one collided with
    pub existing: String,

    /// Container that already holds the existing id
    pub existing_owner: String,
}

impl Display for NamingCollision {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            CollisionKind::Container => "container",
            CollisionKind::Task => "task",
        };
        write!(
            f,
            "derived {kind} `{}` (from `{}`, replica {}) ",
            self.derived, self.derived_from, self.replica
        )?;
        write!(
            f,
            "collides with existing {kind} `{}` in container `{}`",
            self.existing, self.existing_owner
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_error() {
        let err = GenerationError::configuration(0);
        assert!(err.is_configuration_error());
        assert!(!err.is_collision());
        assert!(err.to_string().contains("got 0"));
    }

    #[test]
    fn collision_message_names_both_sides() {
        let err = GenerationError::collision(NamingCollision {
            kind: CollisionKind::Container,
            derived: "0-0".to_string(),
            derived_from: "0".to_string(),
            replica: ReplicaIndex::new(0),
            existing: "0-0".to_string(),
            existing_owner: "0-0".to_string(),
        });

        assert!(err.is_collision());
        let msg = err.to_string();
        assert!(msg.contains("from `0`"));
        assert!(msg.contains("existing container `0-0`"));
        assert_eq!(err.as_collision().map(|c| c.kind), Some(CollisionKind::Container));
    }
}
