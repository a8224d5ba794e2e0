//! Standby Job Model
//!
//! Typed job model for partitioned stream jobs: which tasks run in which
//! container, which partitions each task consumes, and which change-log
//! partition backs its state.
//!
//! # Core Concepts
//!
//! - [`Partition`]: One shard of an input stream (system, stream, partition)
//! - [`ChangelogPartition`]: Durable log partition backing a task's stores
//! - [`TaskRole`]: Active or standby role of a task instance
//! - [`TaskModel`]: Task name, partitions, change log and role
//! - [`ContainerModel`]: Container id plus the tasks it runs
//! - [`ContainerLayout`]: Full job assignment keyed by container id
//!
//! # Example
//!
//! ```rust
//! use standby_model::{ChangelogPartition, ContainerLayout, ContainerModel, Partition, TaskModel};
//!
//! let task = TaskModel::active(
//!     "Partition 0",
//!     [Partition::new("kafka", "clicks", 0)],
//!     ChangelogPartition::new(0),
//! );
//! let container = ContainerModel::from_tasks("0", [task]).unwrap();
//! let layout = ContainerLayout::from_containers([container]).unwrap();
//!
//! assert_eq!(layout.len(), 1);
//! assert_eq!(layout.task_count(), 1);
//! ```

#![warn(unreachable_pub)]
#![warn(missing_docs)]

// Core modules
mod container;
mod error;
mod layout;
mod partition;
mod role;
mod task;

// Re-exports
pub use container::{ContainerId, ContainerModel};
pub use error::ModelError;
pub use layout::ContainerLayout;
pub use partition::{ChangelogPartition, Partition};
pub use role::TaskRole;
pub use task::{TaskModel, TaskName};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
