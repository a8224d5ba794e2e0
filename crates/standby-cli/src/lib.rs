//! Standby CLI library
//!
//! Command implementations behind the `standby` binary, kept separate from
//! argument parsing so they can be tested without a process.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod commands;
pub mod logging;

pub use commands::{expand, load_layout, resolve_replication_factor, validate, ExpandReport};
pub use logging::{init_logging, LogFormat};
