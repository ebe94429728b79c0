//! Tooling Layer
//!
//! The command-line surface: argument parsing, command dispatch and the
//! interactive browse session.

pub mod browse;
pub mod cli;

pub use browse::BrowseAction;
pub use cli::{Cli, CliContext, Commands};
