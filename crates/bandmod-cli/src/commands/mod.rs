//! CLI subcommands.

pub mod check_config;
pub mod init_config;
pub mod process;
