// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod emit;
pub mod io;
pub mod pipeline;
pub mod progress;
pub mod resolver;
pub mod symbols;
pub mod template;

// Re-export commonly used types
pub use crate::core::{
    EnumType, Error, MethodDefinition, ParameterDefinition, Result, ServiceInterfaceDefinition,
    TypeDescriptor,
};

pub use crate::emit::{plan_blocks, Block, EmitOptions};

pub use crate::resolver::{
    classify, collect_entries, EnumFormatterEntry, GenericFormatterEntry, RawEntry,
    ResolverEntries,
};

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};

pub use crate::pipeline::{GenerationOutput, Generator};

pub use crate::symbols::{ManifestSymbolProvider, SymbolProvider};

pub use crate::template::{CSharpTemplateEngine, TemplateEngine};
