//! CLI subcommands

pub mod list;
pub mod show;
pub mod watch;
