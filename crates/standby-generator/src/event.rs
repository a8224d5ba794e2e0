//! Observability events returned by generation
//!
//! Generation never logs. It returns these events alongside the layout and
//! the caller decides whether to emit them, forward them, or drop them.

use serde::Serialize;
use standby_model::ContainerId;

/// Why generation returned its input unchanged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PassThroughReason {
    /// Input layout had no containers
    EmptyLayout,

    /// Replication factor of 1 asks for no standbys
    ReplicationDisabled,
}

/// One step of a generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GenerationEvent {
    /// Input accepted for generation
    Received {
        /// Number of active containers
        containers: usize,
        /// Requested replication factor
        replication_factor: u32,
    },

    /// Input returned unchanged
    PassThrough {
        /// Why nothing was generated
        reason: PassThroughReason,
    },

    /// Standby tasks generated for one buddy container
    StandbyTasksGenerated {
        /// Active container being mirrored
        active_container: ContainerId,
        /// Buddy container receiving the standbys
        buddy_container: ContainerId,
        /// Number of standby tasks
        tasks: usize,
    },

    /// Buddy containers merged into the layout
    BuddyContainersAdded {
        /// Ids of every buddy container added
        buddy_containers: Vec<ContainerId>,
    },
}

impl GenerationEvent {
    /// Emit this event through `tracing`
    pub fn emit(&self) {
        match self {
            Self::Received {
                containers,
                replication_factor,
            } => {
                tracing::debug!(containers, replication_factor, "Received container layout");
            }
            Self::PassThrough { reason } => {
                tracing::info!(?reason, "No standby tasks generated");
            }
            Self::StandbyTasksGenerated {
                active_container,
                buddy_container,
                tasks,
            } => {
                tracing::info!(
                    active_container = %active_container,
                    buddy_container = %buddy_container,
                    tasks,
                    "Generated standby tasks"
                );
            }
            Self::BuddyContainersAdded { buddy_containers } => {
                tracing::info!(
                    count = buddy_containers.len(),
                    ?buddy_containers,
                    "Adding buddy containers"
                );
            }
        }
    }
}

/// Emit every event in order
pub fn emit_all(events: &[GenerationEvent]) {
    events.iter().for_each(GenerationEvent::emit);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_tagged() {
        let event = GenerationEvent::PassThrough {
            reason: PassThroughReason::ReplicationDisabled,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "pass_through");
        assert_eq!(json["reason"], "replication_disabled");
    }

    #[test]
    fn emit_without_subscriber_is_silent() {
        emit_all(&[
            GenerationEvent::Received {
                containers: 2,
                replication_factor: 3,
            },
            GenerationEvent::BuddyContainersAdded {
                buddy_containers: vec![ContainerId::new("0-0")],
            },
        ]);
    }
}
