//! Derived identifiers for buddy containers and standby tasks
//!
//! Derived ids are typed composite keys (base id + replica index). The
//! legacy string forms are produced only by `Display` and the conversions
//! into [`ContainerId`] / [`TaskName`]:
//!
//! - buddy container: `<active id>-<replica>` (e.g. `0-1`)
//! - standby task: `Standby <active name>-<replica>` (e.g. `Standby Partition 0-1`)

use serde::{Deserialize, Serialize};
use standby_model::{ContainerId, TaskName};
use std::fmt::{self, Display, Formatter};

/// Separator between an active container id and the replica index
pub const CONTAINER_ID_SEPARATOR: &str = "-";

/// Separator between an active task name and the replica index
pub const TASK_NAME_SEPARATOR: &str = "-";

/// Marker prefixed to every standby task name
///
/// Reserved: active task names must not start with it.
pub const STANDBY_TASK_NAME_PREFIX: &str = "Standby ";

/// Zero-based index of a standby replica
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ReplicaIndex(u32);

impl ReplicaIndex {
    /// Create new replica index
    #[inline]
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Index value
    #[inline]
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Display for ReplicaIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Id of a buddy container: the active container it mirrors plus a replica index
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BuddyContainerId {
    active: ContainerId,
    replica: ReplicaIndex,
}

impl BuddyContainerId {
    /// Create new buddy container id
    #[inline]
    #[must_use]
    pub fn new(active: ContainerId, replica: ReplicaIndex) -> Self {
        Self { active, replica }
    }

    /// Split a legacy buddy id at its last separator
    ///
    /// Returns `None` if there is no separator or the suffix is not a
    /// decimal replica index. Parsing does not prove the base is a real
    /// active container; callers check that against their layout.
    #[must_use]
    pub fn parse(id: &str) -> Option<Self> {
        let (base, replica) = id.rsplit_once(CONTAINER_ID_SEPARATOR)?;
        if base.is_empty() || !is_decimal(replica) {
            return None;
        }
        let replica = replica.parse().ok()?;
        Some(Self::new(ContainerId::new(base), ReplicaIndex::new(replica)))
    }

    /// Active container this buddy mirrors
    #[inline]
    #[must_use]
    pub fn active(&self) -> &ContainerId {
        &self.active
    }

    /// Replica index
    #[inline]
    #[must_use]
    pub fn replica(&self) -> ReplicaIndex {
        self.replica
    }

    /// Legacy string id
    #[inline]
    #[must_use]
    pub fn to_container_id(&self) -> ContainerId {
        ContainerId::new(self.to_string())
    }
}

impl Display for BuddyContainerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.active, CONTAINER_ID_SEPARATOR, self.replica)
    }
}

impl From<&BuddyContainerId> for ContainerId {
    fn from(id: &BuddyContainerId) -> Self {
        id.to_container_id()
    }
}

/// Name of a standby task: the active task it mirrors plus a replica index
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StandbyTaskName {
    active: TaskName,
    replica: ReplicaIndex,
}

impl StandbyTaskName {
    /// Create new standby task name
    #[inline]
    #[must_use]
    pub fn new(active: TaskName, replica: ReplicaIndex) -> Self {
        Self { active, replica }
    }

    /// Recover the composite key from a legacy standby task name
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let rest = name.strip_prefix(STANDBY_TASK_NAME_PREFIX)?;
        let (active, replica) = rest.rsplit_once(TASK_NAME_SEPARATOR)?;
        if !is_decimal(replica) {
            return None;
        }
        let replica = replica.parse().ok()?;
        Some(Self::new(TaskName::new(active), ReplicaIndex::new(replica)))
    }

    /// Active task this standby mirrors
    #[inline]
    #[must_use]
    pub fn active(&self) -> &TaskName {
        &self.active
    }

    /// Replica index
    #[inline]
    #[must_use]
    pub fn replica(&self) -> ReplicaIndex {
        self.replica
    }

    /// Legacy string name
    #[inline]
    #[must_use]
    pub fn to_task_name(&self) -> TaskName {
        TaskName::new(self.to_string())
    }
}

impl Display for StandbyTaskName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            STANDBY_TASK_NAME_PREFIX, self.active, TASK_NAME_SEPARATOR, self.replica
        )
    }
}

impl From<&StandbyTaskName> for TaskName {
    fn from(name: &StandbyTaskName) -> Self {
        name.to_task_name()
    }
}

/// Derive the buddy container id for `active` at `replica`
#[inline]
#[must_use]
pub fn derive_container_id(active: &ContainerId, replica: ReplicaIndex) -> BuddyContainerId {
    BuddyContainerId::new(active.clone(), replica)
}

/// Derive the standby task name for `active` at `replica`
#[inline]
#[must_use]
pub fn derive_standby_task_name(active: &TaskName, replica: ReplicaIndex) -> StandbyTaskName {
    StandbyTaskName::new(active.clone(), replica)
}

/// Check if a task name carries the reserved standby marker
#[inline]
#[must_use]
pub fn is_reserved_task_name(name: &TaskName) -> bool {
    name.as_str().starts_with(STANDBY_TASK_NAME_PREFIX)
}

fn is_decimal(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
