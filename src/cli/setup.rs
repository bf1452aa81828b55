//! Setup and initialization functions for CLI
//!
//! Logging is configured once at startup. `RUST_LOG` wins when set; otherwise
//! the level follows the `-v` count.

use tracing_subscriber::EnvFilter;

/// Default filter directive for a verbosity level
pub fn log_level(verbosity: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global tracing subscriber. `log` records from library code are
/// bridged into it.
pub fn init_logging(verbosity: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level(verbosity, quiet)));

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbosity > 1)
        .try_init();

    if let Err(e) = result {
        // Already configured - this is fine, just ignore
        eprintln!("Note: Logging already configured: {}", e);
    }
}

/// Get the number of worker threads rayon will use
pub fn get_worker_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_levels() {
        assert_eq!(log_level(0, false), "warn");
        assert_eq!(log_level(1, false), "info");
        assert_eq!(log_level(2, false), "debug");
        assert_eq!(log_level(7, false), "trace");
        assert_eq!(log_level(3, true), "error");
    }
}
