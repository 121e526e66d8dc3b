//! Command line interface module
//!
//! Argument parsing and the runner that maps each subcommand onto a
//! [`crate::registry::QuayClient`] call.

pub mod args;
pub mod runner;

pub use args::{Args, Command};
pub use runner::{DeleteOutcome, ResourceKind, Runner, delete_batch};
