//! Process-wide infrastructure shared by the workspace binaries: configuration
//! and logging.

pub mod config;
pub mod logging;
