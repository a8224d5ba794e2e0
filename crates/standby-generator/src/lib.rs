//! Standby Buddy Container Generation
//!
//! Expands an active container layout with warm-standby replicas: for a
//! replication factor `r`, every active container gets `r - 1` buddy
//! containers, each holding one standby copy of all of its tasks.
//!
//! # Core Concepts
//!
//! - [`StandbyTaskGenerator`]: Seam for standby generation strategies
//! - [`BuddyContainerGenerator`]: Standbys in dedicated buddy containers
//! - [`BuddyContainerId`] / [`StandbyTaskName`]: Typed derived identifiers
//! - [`replicate_tasks`]: Active task set to standby task set
//! - [`merge`] / [`LayoutMerge`]: Collision-checked layout merge
//! - [`GenerationEvent`]: Observability events returned to the caller
//! - [`StandbyConfig`]: Replication settings from TOML/YAML/job config
//!
//! # Example
//!
//! ```rust,ignore
//! use standby_generator::{BuddyContainerGenerator, StandbyTaskGenerator, emit_all};
//!
//! let generator = BuddyContainerGenerator::new();
//! let outcome = generator.generate_standby_tasks(&layout, 3)?;
//!
//! // The caller decides what to do with the events
//! emit_all(&outcome.events);
//! assert_eq!(outcome.layout.len(), layout.len() * 3);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod buddy;
mod config;
mod error;
mod event;
mod generator;
mod merge;
mod naming;
mod replication;
mod validation;

// Re-exports
pub use buddy::{buddies_of, BuddyContainer};
pub use config::{
    ConfigError, StandbyConfig, DEFAULT_REPLICATION_FACTOR, REPLICATION_FACTOR_KEY,
};
pub use error::{CollisionKind, GenerationError, NamingCollision};
pub use event::{emit_all, GenerationEvent, PassThroughReason};
pub use generator::{
    BuddyContainerGenerator, GenerationOutcome, ReplicationFactor, StandbyTaskGenerator,
};
pub use merge::{merge, LayoutMerge};
pub use naming::{
    derive_container_id, derive_standby_task_name, is_reserved_task_name, BuddyContainerId,
    ReplicaIndex, StandbyTaskName, CONTAINER_ID_SEPARATOR, STANDBY_TASK_NAME_PREFIX,
    TASK_NAME_SEPARATOR,
};
pub use replication::replicate_tasks;
pub use validation::validate_active_layout;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for standby generation
    pub use crate::{
        BuddyContainerGenerator, GenerationError, GenerationOutcome, StandbyConfig,
        StandbyTaskGenerator,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;
    use standby_model::{ChangelogPartition, ContainerLayout, ContainerModel, Partition, TaskModel};

    #[test]
    fn config_drives_generation() {
        let layout = ContainerLayout::from_containers([ContainerModel::from_tasks(
            "0",
            [TaskModel::active(
                "Partition 0",
                [Partition::new("kafka", "s", 0)],
                ChangelogPartition::new(0),
            )],
        )
        .unwrap()])
        .unwrap();

        let config = StandbyConfig::from_toml_str("replication-factor = 3").unwrap();
        let outcome = BuddyContainerGenerator::new()
            .generate(&layout, config.validate().unwrap())
            .unwrap();

        assert_eq!(outcome.layout.len(), 3);
        assert_eq!(buddies_of(&outcome.layout, &layout, "0").len(), 2);
        assert_eq!(outcome.buddies_of("0").len(), 2);
    }

    #[test]
    fn generator_as_trait_object() {
        let generator: Box<dyn StandbyTaskGenerator> = Box::new(BuddyContainerGenerator::new());
        let outcome = generator
            .generate_standby_tasks(&ContainerLayout::new(), 2)
            .unwrap();
        assert!(outcome.is_pass_through());
    }
}
