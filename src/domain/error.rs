//! Domain error types.

/// Top-level error type for cashtrack.
#[derive(Debug, thiserror::Error)]
pub enum CashtrackError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("trade source error: {reason}")]
    TradeSource { reason: String },

    #[error("starting cash must be positive, got {value}")]
    InvalidStartingCash { value: f64 },

    #[error("allocation fraction must be in (0, 1], got {value}")]
    InvalidFraction { value: f64 },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&CashtrackError> for std::process::ExitCode {
    fn from(err: &CashtrackError) -> Self {
        let code: u8 = match err {
            CashtrackError::Io(_) => 1,
            CashtrackError::ConfigParse { .. }
            | CashtrackError::ConfigMissing { .. }
            | CashtrackError::ConfigInvalid { .. } => 2,
            CashtrackError::TradeSource { .. } => 3,
            CashtrackError::InvalidStartingCash { .. } | CashtrackError::InvalidFraction { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
