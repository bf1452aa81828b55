use super::core::{ContractgenConfig, GeneratorConfig};
use crate::core::{Error, Result};

/// Pure check for a single C# identifier
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_alphabetic() => {
            chars.all(|c| c == '_' || c.is_alphanumeric())
        }
        _ => false,
    }
}

/// Pure check for a dotted namespace such as `Company.Generated`
pub fn is_namespace(name: &str) -> bool {
    !name.is_empty() && name.split('.').all(is_identifier)
}

pub fn validate_generator(generator: &GeneratorConfig) -> Result<()> {
    if !is_namespace(&generator.namespace_root) {
        return Err(Error::Configuration(format!(
            "namespace_root `{}` is not a valid namespace",
            generator.namespace_root
        )));
    }
    if !is_identifier(&generator.resolver_name) {
        return Err(Error::Configuration(format!(
            "resolver_name `{}` is not a valid identifier",
            generator.resolver_name
        )));
    }
    if let Some(symbol) = generator
        .conditional_symbols
        .iter()
        .find(|s| !is_identifier(s))
    {
        return Err(Error::Configuration(format!(
            "conditional symbol `{symbol}` is not a valid identifier"
        )));
    }
    Ok(())
}

pub fn validate_config(config: &ContractgenConfig) -> Result<()> {
    match &config.generator {
        Some(generator) => validate_generator(generator),
        None => Ok(()),
    }
}
