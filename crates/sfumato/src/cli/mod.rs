//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the sfumato binary.

mod commands;
mod name;
mod process;

pub use commands::{Cli, Commands};
pub use name::print_name;
pub use process::{ProcessTargets, run_process};
