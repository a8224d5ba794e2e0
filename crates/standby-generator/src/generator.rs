//! Standby task generator trait and the buddy container implementation
//!
//! Provides the [`StandbyTaskGenerator`] seam used by job-model builders and
//! [`BuddyContainerGenerator`], which places standby tasks in dedicated
//! buddy containers.

use crate::buddy::BuddyContainer;
use crate::error::GenerationError;
use crate::event::{GenerationEvent, PassThroughReason};
use crate::merge::LayoutMerge;
use crate::naming::{BuddyContainerId, ReplicaIndex};
use crate::validation::validate_active_layout;
use standby_model::{ContainerLayout, ContainerModel};
use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};

/// Total copies of every task: one active plus `factor - 1` standbys
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReplicationFactor(u32);

impl ReplicationFactor {
    /// Factor with no standbys
    pub const NONE: Self = Self(1);

    /// Validate a configured factor
    ///
    /// # Errors
    /// Returns [`GenerationError::Configuration`] if `value < 1`. The value
    /// is never clamped.
    pub fn new(value: i64) -> Result<Self, GenerationError> {
        match u32::try_from(value) {
            Ok(factor) if factor >= 1 => Ok(Self(factor)),
            _ => Err(GenerationError::configuration(value)),
        }
    }

    /// Factor value
    #[inline]
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Number of buddy containers per active container
    #[inline]
    #[must_use]
    pub const fn buddies_per_container(self) -> u32 {
        self.0 - 1
    }

    /// Check if any standby replica is requested
    #[inline]
    #[must_use]
    pub const fn has_standbys(self) -> bool {
        self.0 > 1
    }

    /// Replica indices `0 ..= factor - 2`
    pub fn replica_indices(self) -> impl Iterator<Item = ReplicaIndex> {
        (0..self.buddies_per_container()).map(ReplicaIndex::new)
    }
}

impl TryFrom<i32> for ReplicationFactor {
    type Error = GenerationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(i64::from(value))
    }
}

impl Display for ReplicationFactor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Expanded layout plus the events describing how it was produced
///
/// Buddy containers are told apart from active ones by `buddies`, never by
/// their contents: an empty container is active or a buddy only according
/// to where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOutcome {
    /// Expanded layout (or the input, on pass-through)
    pub layout: ContainerLayout,

    /// Events in the order they happened
    pub events: Vec<GenerationEvent>,

    /// Ids of the buddy containers this run added
    pub buddies: BTreeSet<BuddyContainerId>,
}

impl GenerationOutcome {
    fn pass_through(layout: &ContainerLayout, events: Vec<GenerationEvent>) -> Self {
        Self {
            layout: layout.clone(),
            events,
            buddies: BTreeSet::new(),
        }
    }

    /// Buddy containers generated for `active_id`, ordered by replica index
    #[must_use]
    pub fn buddies_of(&self, active_id: &str) -> Vec<(ReplicaIndex, &ContainerModel)> {
        self.buddies
            .iter()
            .filter(|id| id.active().as_str() == active_id)
            .filter_map(|id| {
                let container = self.layout.get(&id.to_string())?;
                Some((id.replica(), container))
            })
            .collect()
    }

    /// Containers of the layout that were not added by this run
    pub fn active_containers(&self) -> impl Iterator<Item = &ContainerModel> {
        let generated: BTreeSet<_> = self
            .buddies
            .iter()
            .map(BuddyContainerId::to_container_id)
            .collect();
        self.layout
            .iter()
            .filter(move |(id, _)| !generated.contains(*id))
            .map(|(_, container)| container)
    }

    /// Split into layout and events
    #[inline]
    #[must_use]
    pub fn into_parts(self) -> (ContainerLayout, Vec<GenerationEvent>) {
        (self.layout, self.events)
    }

    /// Check if generation returned its input unchanged
    #[must_use]
    pub fn is_pass_through(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, GenerationEvent::PassThrough { .. }))
    }
}

/// Generates standby tasks for an active container layout
///
/// Implementations must be pure: the input layout is never mutated and the
/// same input always yields the same output.
pub trait StandbyTaskGenerator: Send + Sync + std::fmt::Debug {
    /// Expand `layout` with standby tasks for `replication_factor`
    ///
    /// # Errors
    /// - [`GenerationError::Configuration`] if `replication_factor < 1`
    /// - [`GenerationError::NamingCollision`] if a derived id already exists
    /// - [`GenerationError::InvalidLayout`] / [`GenerationError::ReservedName`]
    ///   if `layout` is not a purely active assignment
    fn generate_standby_tasks(
        &self,
        layout: &ContainerLayout,
        replication_factor: i32,
    ) -> Result<GenerationOutcome, GenerationError>;

    /// Generator name (for diagnostics)
    fn name(&self) -> &'static str;
}

/// Places the standbys of each active container in dedicated buddy containers
///
/// For replication factor `r`, every active container `c` gets `r - 1`
/// buddies `c-0 .. c-(r-2)`, each holding one standby of every task in `c`
/// named `Standby <task>-<replica>`.
///
/// ```text
/// Container 0   : Partition 0, Partition 1
/// Container 1   : Partition 2, Partition 3
///
/// r = 3 adds:
/// Container 0-0 : Standby Partition 0-0, Standby Partition 1-0
/// Container 0-1 : Standby Partition 0-1, Standby Partition 1-1
/// Container 1-0 : Standby Partition 2-0, Standby Partition 3-0
/// Container 1-1 : Standby Partition 2-1, Standby Partition 3-1
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BuddyContainerGenerator;

impl BuddyContainerGenerator {
    /// Create new generator
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Expand `layout` for an already validated factor
    ///
    /// # Errors
    /// Same as [`StandbyTaskGenerator::generate_standby_tasks`], minus the
    /// configuration error
    pub fn generate(
        &self,
        layout: &ContainerLayout,
        factor: ReplicationFactor,
    ) -> Result<GenerationOutcome, GenerationError> {
        let mut events = vec![GenerationEvent::Received {
            containers: layout.len(),
            replication_factor: factor.get(),
        }];

        let pass_through = if layout.is_empty() {
            Some(PassThroughReason::EmptyLayout)
        } else if !factor.has_standbys() {
            Some(PassThroughReason::ReplicationDisabled)
        } else {
            None
        };
        if let Some(reason) = pass_through {
            events.push(GenerationEvent::PassThrough { reason });
            return Ok(GenerationOutcome::pass_through(layout, events));
        }

        validate_active_layout(layout)?;

        // Merged as derived; the first collision ends generation
        let mut merged = LayoutMerge::new(layout);
        let mut buddies = BTreeSet::new();
        let mut buddy_ids = Vec::new();
        for container in layout.iter().map(|(_, c)| c) {
            for replica in factor.replica_indices() {
                let buddy = BuddyContainer::derive(container, replica)?;
                events.push(GenerationEvent::StandbyTasksGenerated {
                    active_container: container.id().clone(),
                    buddy_container: buddy.model().id().clone(),
                    tasks: buddy.model().len(),
                });
                buddy_ids.push(buddy.model().id().clone());
                buddies.insert(buddy.id().clone());
                merged.push(buddy)?;
            }
        }

        events.push(GenerationEvent::BuddyContainersAdded {
            buddy_containers: buddy_ids,
        });

        Ok(GenerationOutcome {
            layout: merged.finish(),
            events,
            buddies,
        })
    }
}

impl StandbyTaskGenerator for BuddyContainerGenerator {
    fn generate_standby_tasks(
        &self,
        layout: &ContainerLayout,
        replication_factor: i32,
    ) -> Result<GenerationOutcome, GenerationError> {
        // Checked before anything else, so an empty layout still fails
        let factor = ReplicationFactor::try_from(replication_factor)?;
        self.generate(layout, factor)
    }

    fn name(&self) -> &'static str {
        "BuddyContainer"
    }
}
