//! CLI support for the `rfind` binary.

pub mod args;
pub mod commands;
pub mod context;
mod logging;
pub mod output;

pub use context::CommandContext;
pub use logging::init_logging;
