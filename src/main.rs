use anyhow::Result;
use contractgen::cli::{init_logging, parse_args, Commands, GenerateArgs};
use contractgen::commands::{handle_generate, init_config, load_generate_config};

// Main orchestrator function
fn main() -> Result<()> {
    let cli = parse_args();

    match cli.command {
        Commands::Generate {
            input,
            output,
            unuse_unity_attr,
            conditional_symbols,
            namespace_root,
            resolver_name,
            format,
            config,
            no_parallel,
            quiet,
            verbosity,
        } => {
            init_logging(verbosity, quiet);
            let args = GenerateArgs {
                input,
                output,
                unuse_unity_attr,
                conditional_symbols,
                namespace_root,
                resolver_name,
                format,
                no_parallel,
                quiet,
                verbosity,
            };
            let generate_config = load_generate_config(args, config.as_deref())?;
            handle_generate(generate_config)?;
            Ok(())
        }
        Commands::Init { force } => {
            init_logging(0, false);
            init_config(force)
        }
    }
}
