use crate::cli::{build_generate_config, get_worker_count, GenerateArgs, GenerateConfig};
use crate::config::{self, ContractgenConfig};
use crate::io;
use crate::io::output::create_writer;
use crate::pipeline::Generator;
use crate::progress::{ProgressConfig, ProgressManager};
use crate::symbols::{ManifestSymbolProvider, SymbolProvider};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Resolve file configuration (explicit path, or discovery from the working
/// directory) and merge the command-line overrides over it
pub fn load_generate_config(args: GenerateArgs, config_path: Option<&Path>) -> Result<GenerateConfig> {
    let file_config: ContractgenConfig = match config_path {
        Some(path) => config::load_config_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => config::load_config(),
    };
    Ok(build_generate_config(args, &file_config)?)
}

/// Run one generation and return the path written
pub fn handle_generate(config: GenerateConfig) -> Result<PathBuf> {
    let progress = ProgressManager::new(ProgressConfig::from_env(config.quiet, config.verbosity));

    if config.parallel && progress.verbosity() > 0 {
        log::info!("Classifying methods on {} threads", get_worker_count());
    }

    let phase = progress.start_phase("Contract Collect");
    let provider = ManifestSymbolProvider::new(&config.input)
        .with_conditional_symbols(config.generator.conditional_symbols.clone());
    let definitions = provider
        .definitions()
        .with_context(|| format!("Failed to read contracts from {}", config.input.display()))?;
    phase.set_message(&format!("{} interfaces", definitions.len()));
    phase.finish();

    let phase = progress.start_phase("Output Generation");
    let generator = Generator::new(config.generator.emit_options()).parallel(config.parallel);
    let output = if config.format.needs_rendering() {
        generator.generate(&definitions)?
    } else {
        generator.outline(&definitions)
    };
    log::info!(
        "Generated {} generic and {} enum formatter registrations",
        output.entries.generic.len(),
        output.entries.enums.len()
    );
    phase.finish();

    let phase = progress.start_phase("Output Write");
    let mut buffer = Vec::new();
    {
        let mut writer = create_writer(config.format, Box::new(&mut buffer));
        writer.write_output(&output)?;
    }
    let content = String::from_utf8(buffer).context("Generated output is not valid UTF-8")?;
    let written = io::write_output(&config.output, &content)?;
    phase.finish();

    progress.status("[Out]", &written.display().to_string());
    Ok(written)
}
