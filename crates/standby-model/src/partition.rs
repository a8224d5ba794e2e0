//! Stream and change-log partition identifiers

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// One shard of an input stream
///
/// Assigned upstream and never modified by this workspace. Ordered so that a
/// task's partitions can live in a `BTreeSet` and serialize deterministically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Partition {
    /// Messaging system name (e.g. `kafka`)
    pub system: String,

    /// Stream (topic) name within the system
    pub stream: String,

    /// Partition number within the stream
    pub partition: u32,
}

impl Partition {
    /// Create new partition identifier
    #[inline]
    #[must_use]
    pub fn new(system: impl Into<String>, stream: impl Into<String>, partition: u32) -> Self {
        Self {
            system: system.into(),
            stream: stream.into(),
            partition,
        }
    }
}

impl Display for Partition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}#{}", self.system, self.stream, self.partition)
    }
}

/// Change-log partition backing a task's state stores
///
/// A standby replica replays this partition to keep warmed state.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ChangelogPartition(u32);

impl ChangelogPartition {
    /// Create new change-log partition identifier
    #[inline]
    #[must_use]
    pub const fn new(partition: u32) -> Self {
        Self(partition)
    }

    /// Partition number
    #[inline]
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Display for ChangelogPartition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "changelog#{}", self.0)
    }
}
