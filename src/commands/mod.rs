//! CLI command implementations for contractgen.
//!
//! Available commands:
//! - **generate**: Read contract manifests and write the generated resolver, enum
//!   formatters and client stubs
//! - **init**: Initialize a new `.contractgen.toml` configuration file

pub mod generate;
pub mod init;

pub use generate::{handle_generate, load_generate_config};
pub use init::{init_config, init_config_at};
