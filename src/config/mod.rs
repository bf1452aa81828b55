mod core;
mod loader;
pub mod validation;

pub use core::{
    default_namespace_root, default_resolver_name, ContractgenConfig, GeneratorConfig,
    OutputConfig, PerformanceConfig,
};
pub use loader::{
    directory_ancestors, discover_config, load_config, load_config_from,
    parse_and_validate_config, CONFIG_FILE_NAME,
};
pub use validation::{validate_config, validate_generator};
