use thiserror::Error;

use marketsift_screener::ScreenError;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] marketsift_core::ValidationError),

    #[error("unknown strategy '{key}', run `marketsift strategies` for the catalog")]
    UnknownStrategy { key: String },

    #[error("strict mode failed: {error_count} provider error(s) recorded")]
    StrictModeViolation { error_count: usize },

    #[error(transparent)]
    Core(#[from] marketsift_core::CoreError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<ScreenError> for CliError {
    fn from(error: ScreenError) -> Self {
        match error {
            ScreenError::UnknownStrategy { key } => Self::UnknownStrategy { key },
            ScreenError::Core(core) => Self::Core(core),
        }
    }
}

impl CliError {
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::UnknownStrategy { .. } => 3,
            Self::StrictModeViolation { .. } => 5,
            Self::Core(_) | Self::Serialization(_) | Self::Io(_) => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_stable() {
        let validation: CliError = marketsift_core::ValidationError::EmptySymbol.into();
        assert_eq!(validation.exit_code(), 2);

        let unknown = CliError::UnknownStrategy {
            key: String::from("nope"),
        };
        assert_eq!(unknown.exit_code(), 3);

        let strict = CliError::StrictModeViolation { error_count: 2 };
        assert_eq!(strict.exit_code(), 5);
    }
}
