// src/errors.rs

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RulebotError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("terminal error: {0}")]
    Terminal(String),

    #[error("logging error: {0}")]
    Logging(#[from] flexi_logger::FlexiLoggerError),
}

impl RulebotError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        RulebotError::Config(msg.into())
    }

    pub fn terminal_error(msg: impl Into<String>) -> Self {
        RulebotError::Terminal(msg.into())
    }
}

pub type RulebotResult<T> = Result<T, RulebotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_message() {
        let err = RulebotError::config_error("tick_rate_ms must be positive");
        assert_eq!(
            err.to_string(),
            "configuration error: tick_rate_ms must be positive"
        );
    }

    #[test]
    fn test_io_error_converts() {
        fn open_missing() -> RulebotResult<String> {
            Ok(std::fs::read_to_string("/definitely/not/here/rulebot.json")?)
        }
        assert!(matches!(open_missing(), Err(RulebotError::Io(_))));
    }
}
