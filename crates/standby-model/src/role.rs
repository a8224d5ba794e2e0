//! Task roles

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Logical role of a task instance
///
/// Serialized with the job model's wire names: `active` and `standbyState`.
/// `standby` is accepted as an input alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum TaskRole {
    /// Consumes input partitions, reads/writes state, produces output
    #[default]
    #[serde(rename = "active")]
    Active,

    /// Only replays its change log to keep warmed state
    #[serde(rename = "standbyState", alias = "standby")]
    Standby,
}

impl TaskRole {
    /// Wire name of the role
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Standby => "standbyState",
        }
    }

    /// Check if role is active
    #[inline]
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    /// Check if role is standby
    #[inline]
    #[must_use]
    pub const fn is_standby(self) -> bool {
        matches!(self, Self::Standby)
    }
}

impl Display for TaskRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
