//! Progress feedback for generation phases.
//!
//! Each phase (collecting contracts, generating, writing) gets a spinner
//! while it runs and a timed completion line when it ends.
//!
//! # Progress Behavior
//!
//! - **Quiet Mode**: No progress output (respects `CONTRACTGEN_QUIET` env var and `--quiet` flag)
//! - **Non-TTY**: Spinners are hidden in CI and piped output; completion lines go to the log
//!
//! ```rust,no_run
//! use contractgen::progress::{ProgressConfig, ProgressManager};
//!
//! let manager = ProgressManager::new(ProgressConfig::from_env(false, 0));
//! let phase = manager.start_phase("Method Collect");
//! // work...
//! phase.finish();
//! ```

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};

pub const TEMPLATE_SPINNER: &str = "{spinner} {msg} ({elapsed})";

/// Configuration for progress display behavior
#[derive(Debug, Clone, Default)]
pub struct ProgressConfig {
    /// Whether to suppress all progress output
    pub quiet_mode: bool,
    /// Verbosity level (0 = basic, 1 = detailed, 2 = very detailed)
    pub verbosity: u8,
}

impl ProgressConfig {
    /// Create progress configuration from environment and CLI arguments
    pub fn from_env(quiet: bool, verbosity: u8) -> Self {
        let env_quiet = std::env::var("CONTRACTGEN_QUIET").is_ok();
        Self {
            quiet_mode: quiet || env_quiet,
            verbosity,
        }
    }

    /// Determine if spinners should be displayed
    pub fn should_show_progress(&self) -> bool {
        if self.quiet_mode {
            return false;
        }

        use std::io::IsTerminal;
        std::io::stderr().is_terminal()
    }
}

#[derive(Debug, Clone)]
pub struct ProgressManager {
    config: ProgressConfig,
}

impl ProgressManager {
    pub fn new(config: ProgressConfig) -> Self {
        Self { config }
    }

    /// Create a spinner, hidden when progress should not be shown
    pub fn create_spinner(&self, msg: &str) -> ProgressBar {
        if !self.config.should_show_progress() {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template(TEMPLATE_SPINNER)
                .expect("Invalid spinner template")
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    pub fn start_phase(&self, name: &str) -> PhaseProgress {
        log::info!("{} Start", name);
        PhaseProgress {
            name: name.to_string(),
            started: Instant::now(),
            bar: self.create_spinner(name),
            quiet: self.config.quiet_mode,
        }
    }

    /// Print a status line unless quiet
    pub fn status(&self, label: &str, detail: &str) {
        if !self.config.quiet_mode {
            eprintln!("{} {}", label.green().bold(), detail);
        }
    }

    pub fn verbosity(&self) -> u8 {
        self.config.verbosity
    }
}

/// A running phase; reports its elapsed time when finished
pub struct PhaseProgress {
    name: String,
    started: Instant,
    bar: ProgressBar,
    quiet: bool,
}

impl PhaseProgress {
    pub fn set_message(&self, msg: &str) {
        self.bar.set_message(format!("{}: {}", self.name, msg));
    }

    pub fn finish(self) -> Duration {
        let elapsed = self.started.elapsed();
        self.bar.finish_and_clear();
        log::info!("{} Complete: {:?}", self.name, elapsed);
        if !self.quiet {
            eprintln!(
                "{} {}",
                format!("{} Complete:", self.name).cyan(),
                format_duration(elapsed)
            );
        }
        elapsed
    }
}

/// `1.234s` / `56ms` style rendering of a phase duration
pub fn format_duration(elapsed: Duration) -> String {
    if elapsed.as_secs() > 0 {
        format!("{:.3}s", elapsed.as_secs_f64())
    } else {
        format!("{}ms", elapsed.as_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_mode_disables_progress() {
        std::env::set_var("CONTRACTGEN_QUIET", "1");
        let config = ProgressConfig::from_env(false, 0);
        assert!(!config.should_show_progress());
        std::env::remove_var("CONTRACTGEN_QUIET");
    }

    #[test]
    fn test_explicit_quiet_flag() {
        let config = ProgressConfig::from_env(true, 0);
        assert!(!config.should_show_progress());
    }

    #[test]
    fn test_verbosity_levels() {
        let manager = ProgressManager::new(ProgressConfig::from_env(false, 2));
        assert_eq!(manager.verbosity(), 2);
    }

    #[test]
    fn test_quiet_phase_uses_hidden_spinner() {
        let manager = ProgressManager::new(ProgressConfig {
            quiet_mode: true,
            verbosity: 0,
        });
        let spinner = manager.create_spinner("Test");
        assert!(spinner.is_hidden());
        let phase = manager.start_phase("Test");
        phase.set_message("working");
        phase.finish();
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(56)), "56ms");
        assert_eq!(format_duration(Duration::from_millis(1234)), "1.234s");
    }
}
