// src/logging.rs

use crate::config::Config;
use crate::errors::RulebotResult;
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming};

const LOG_BASENAME: &str = "rulebot";
const ROTATE_BYTES: u64 = 1_000_000;
const KEEP_LOG_FILES: usize = 3;

/// Starts file logging. The terminal belongs to the UI, so nothing goes to
/// stderr. `RUST_LOG` overrides the configured level. Keep the returned
/// handle alive for the lifetime of the program.
pub fn init_logging(config: &Config) -> RulebotResult<LoggerHandle> {
    let log_dir = config.log_dir()?;

    let handle = Logger::try_with_env_or_str(&config.log_level)?
        .log_to_file(FileSpec::default().directory(log_dir).basename(LOG_BASENAME))
        .rotate(
            Criterion::Size(ROTATE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(KEEP_LOG_FILES),
        )
        .format(flexi_logger::detailed_format)
        .start()?;

    Ok(handle)
}
