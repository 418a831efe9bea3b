use thiserror::Error;

/// Validation and contract errors exposed by `marketsift-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol code must be exactly 6 ASCII digits: '{value}'")]
    InvalidSymbolCode { value: String },
    #[error("symbol code prefix '{prefix}' does not map to a supported exchange")]
    UnsupportedCodePrefix { prefix: char },
    #[error("unknown exchange suffix '{value}', expected SH or SZ")]
    InvalidExchangeSuffix { value: String },

    #[error("invalid source '{value}', expected one of sina, tencent, eastmoney, synthetic")]
    InvalidSource { value: String },

    #[error("invalid industry '{value}'")]
    InvalidIndustry { value: String },

    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },

    #[error("time range start must not be after end")]
    InvalidTimeRange,

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be positive")]
    NonPositiveValue { field: &'static str },

    #[error("request_id must be at least 8 characters")]
    InvalidRequestId,
    #[error("source_chain must contain at least one source")]
    EmptySourceChain,

    #[error("error code cannot be empty")]
    EmptyErrorCode,
    #[error("error message cannot be empty")]
    EmptyErrorMessage,
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
