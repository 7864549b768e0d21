//! Application module.
//!
//! Command-line surface: argument parsing and the runner that wires the
//! configuration, a backend and the state machines together for one
//! subcommand.

mod args;
mod runner;

pub use args::{Cli, Command, TabArg, TopicArg};
pub use runner::{App, Outcome};
