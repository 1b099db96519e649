use std::path::PathBuf;

use crate::kinds::Compat;

/// Configuration required to run one conversion.
/// This decouples the logic from how the arguments were parsed (CLI/Config file).
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub compat: Compat,
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertOutcome {
    Written { records: usize, skipped: usize },
    /// Nothing to export; the output file was not created.
    Empty,
}

/// Default log filter for the given verbosity flags. `RUST_LOG` still wins.
pub fn log_filter(verbose: bool, quiet: bool) -> &'static str {
    match (verbose, quiet) {
        (_, true) => "error",
        (true, false) => "info",
        (false, false) => "warn",
    }
}

pub fn init_logging(verbose: bool, quiet: bool) {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_filter(verbose, quiet)),
    )
    .format_timestamp(None)
    .try_init()
    .ok();
}
