//! Merging CLI arguments over file configuration
//!
//! Flags given on the command line take precedence over `.contractgen.toml`;
//! list flags extend rather than replace the configured symbols.

use crate::config::{validate_generator, ContractgenConfig, GeneratorConfig};
use crate::core::Result;
use crate::io::output::OutputFormat;
use std::path::PathBuf;

/// Command-line overrides for a generate run
#[derive(Debug, Clone, Default)]
pub struct GenerateArgs {
    pub input: PathBuf,
    pub output: PathBuf,
    pub unuse_unity_attr: bool,
    pub conditional_symbols: Vec<String>,
    pub namespace_root: Option<String>,
    pub resolver_name: Option<String>,
    pub format: Option<OutputFormat>,
    pub no_parallel: bool,
    pub quiet: bool,
    pub verbosity: u8,
}

/// Fully resolved settings for a generate run
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub generator: GeneratorConfig,
    pub format: OutputFormat,
    pub parallel: bool,
    pub quiet: bool,
    pub verbosity: u8,
}

/// Pure merge of arguments over file configuration, validated afterwards
pub fn build_generate_config(args: GenerateArgs, file: &ContractgenConfig) -> Result<GenerateConfig> {
    let mut generator = file.generator();

    if let Some(root) = args.namespace_root {
        generator.namespace_root = root;
    }
    if let Some(name) = args.resolver_name {
        generator.resolver_name = name;
    }
    generator.unuse_unity_attribute |= args.unuse_unity_attr;
    for symbol in args.conditional_symbols {
        let symbol = symbol.trim().to_string();
        if !symbol.is_empty() && !generator.conditional_symbols.contains(&symbol) {
            generator.conditional_symbols.push(symbol);
        }
    }

    validate_generator(&generator)?;

    Ok(GenerateConfig {
        input: args.input,
        output: args.output,
        generator,
        format: args.format.unwrap_or_else(|| file.output_format()),
        parallel: !args.no_parallel && file.parallel(),
        quiet: args.quiet,
        verbosity: args.verbosity,
    })
}
