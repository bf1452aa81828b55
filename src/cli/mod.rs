//! CLI module for contractgen
//!
//! This module provides the command-line interface, including:
//! - Argument parsing (`args`)
//! - Merging arguments over file configuration (`config_builder`)
//! - Runtime setup (`setup`)

pub mod args;
pub mod config_builder;
pub mod setup;

pub use args::{parse_args, Cli, Commands};
pub use config_builder::{build_generate_config, GenerateArgs, GenerateConfig};
pub use setup::{get_worker_count, init_logging, log_level};
