use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::Result;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = r#"# contractgen configuration

[generator]
namespace_root = "MagicOnion"
resolver_name = "MagicOnionResolver"
unuse_unity_attribute = false
conditional_symbols = []

[output]
format = "source"

[performance]
parallel = true
"#;

pub fn init_config(force: bool) -> Result<()> {
    init_config_at(Path::new("."), force)?;
    println!("Created {CONFIG_FILE_NAME} configuration file");
    Ok(())
}

/// Write the default configuration into `dir`, refusing to overwrite unless forced
pub fn init_config_at(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    io::write_file(&config_path, DEFAULT_CONFIG)?;
    Ok(config_path)
}
