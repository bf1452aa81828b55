use crate::io::output::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "contractgen")]
#[command(about = "Generate formatter resolvers and client stubs from RPC contract manifests", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the resolver, enum formatters and client stubs
    Generate {
        /// Contract manifest file, or a directory of manifests
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for the generated source
        #[arg(short, long)]
        output: PathBuf,

        /// Do not decorate the initializer with Unity's load attribute
        #[arg(short = 'u', long = "unuse-unity-attr")]
        unuse_unity_attr: bool,

        /// Conditional symbols enabling guarded definitions (comma-separated)
        #[arg(short = 'c', long = "conditional-symbol", value_delimiter = ',')]
        conditional_symbols: Vec<String>,

        /// Root namespace of the generated code
        #[arg(short = 'n', long = "namespace")]
        namespace_root: Option<String>,

        /// Class name of the generated resolver
        #[arg(long = "resolver-name")]
        resolver_name: Option<String>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Configuration file (defaults to the nearest .contractgen.toml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Classify methods on a single thread
        #[arg(long = "no-parallel")]
        no_parallel: bool,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,

        /// Increase verbosity level (can be repeated: -v, -vv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

/// Parse CLI arguments using Clap
pub fn parse_args() -> Cli {
    Cli::parse()
}
