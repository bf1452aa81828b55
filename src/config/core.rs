use serde::{Deserialize, Serialize};

use crate::emit::EmitOptions;
use crate::io::output::OutputFormat;

/// Root configuration structure for contractgen
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ContractgenConfig {
    /// Naming and symbol options for generated code
    #[serde(default)]
    pub generator: Option<GeneratorConfig>,

    /// Output configuration
    #[serde(default)]
    pub output: Option<OutputConfig>,

    /// Performance configuration
    #[serde(default)]
    pub performance: Option<PerformanceConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratorConfig {
    /// Root namespace for the initializer; resolvers and formatters live below it
    #[serde(default = "default_namespace_root")]
    pub namespace_root: String,

    #[serde(default = "default_resolver_name")]
    pub resolver_name: String,

    /// Omit the Unity load attribute on the initializer
    #[serde(default)]
    pub unuse_unity_attribute: bool,

    /// Symbols that enable conditional definitions in contract manifests
    #[serde(default)]
    pub conditional_symbols: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            namespace_root: default_namespace_root(),
            resolver_name: default_resolver_name(),
            unuse_unity_attribute: false,
            conditional_symbols: Vec::new(),
        }
    }
}

pub fn default_namespace_root() -> String {
    "MagicOnion".to_string()
}

pub fn default_resolver_name() -> String {
    "MagicOnionResolver".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PerformanceConfig {
    /// Classify methods on the rayon pool
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            parallel: default_parallel(),
        }
    }
}

fn default_parallel() -> bool {
    true
}

impl ContractgenConfig {
    pub fn generator(&self) -> GeneratorConfig {
        self.generator.clone().unwrap_or_default()
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output
            .as_ref()
            .map(|o| o.format)
            .unwrap_or_default()
    }

    pub fn parallel(&self) -> bool {
        self.performance
            .as_ref()
            .map(|p| p.parallel)
            .unwrap_or_else(default_parallel)
    }
}

impl GeneratorConfig {
    pub fn emit_options(&self) -> EmitOptions {
        EmitOptions {
            namespace_root: self.namespace_root.clone(),
            resolver_name: self.resolver_name.clone(),
            unuse_unity_attribute: self.unuse_unity_attribute,
        }
    }
}
