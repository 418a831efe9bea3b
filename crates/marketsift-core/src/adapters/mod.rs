//! Provider adapter contract and implementations.
//!
//! Each adapter maps one upstream source's wire format into canonical
//! [`StockQuote`] records and classifies every failure as a typed
//! [`FetchError`], because the acquisition chain's retry policy differs per
//! kind. Adapters never touch the cache; caching is the coordinator's job.

mod eastmoney;
mod sina;
mod tencent;

pub use eastmoney::EastmoneyAdapter;
pub use sina::SinaAdapter;
pub use tencent::TencentAdapter;

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use crate::{ProviderId, StockQuote, Symbol, UtcDateTime, ValidationError};

/// Adapter-level failure classification.
///
/// Only `Transport` is retried against the same adapter; the other kinds
/// move the chain to the next source immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    Unauthorized,
    RateLimited,
    Transport,
    Malformed,
}

/// Structured adapter error consumed by the fallback chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    kind: FetchErrorKind,
    message: String,
}

impl FetchError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Unauthorized,
            message: message.into(),
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::RateLimited,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Transport,
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Malformed,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> FetchErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        matches!(self.kind, FetchErrorKind::Transport)
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            FetchErrorKind::Unauthorized => "fetch.unauthorized",
            FetchErrorKind::RateLimited => "fetch.rate_limited",
            FetchErrorKind::Transport => "fetch.transport",
            FetchErrorKind::Malformed => "fetch.malformed",
        }
    }

    /// Map an upstream HTTP status to the failure taxonomy.
    pub fn from_status(provider: ProviderId, status: u16) -> Self {
        match status {
            401 | 403 => Self::unauthorized(format!("{provider} returned status {status}")),
            429 | 456 => Self::rate_limited(format!("{provider} returned status {status}")),
            _ => Self::transport(format!("{provider} returned status {status}")),
        }
    }
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for FetchError {}

/// Bounded query window. Snapshot-only sources may ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: UtcDateTime,
    pub end: UtcDateTime,
}

impl TimeRange {
    pub fn new(start: UtcDateTime, end: UtcDateTime) -> Result<Self, ValidationError> {
        if start > end {
            return Err(ValidationError::InvalidTimeRange);
        }
        Ok(Self { start, end })
    }

    /// Degenerate window anchored at a single instant, the usual shape for
    /// snapshot requests.
    pub fn at(instant: UtcDateTime) -> Self {
        Self {
            start: instant,
            end: instant,
        }
    }
}

/// Request payload for the adapter fetch contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    pub symbols: Vec<Symbol>,
    pub window: TimeRange,
}

impl QuoteRequest {
    pub fn new(symbols: Vec<Symbol>, window: TimeRange) -> Result<Self, FetchError> {
        if symbols.is_empty() {
            return Err(FetchError::malformed(
                "quote request must include at least one symbol",
            ));
        }
        Ok(Self { symbols, window })
    }
}

/// Source adapter contract.
///
/// On success the returned list is at most as long as the requested symbol
/// set, every record satisfies the completeness invariant, and a symbol the
/// source could not fully map is omitted rather than returned partial.
///
/// Implementations must be `Send + Sync`; the chain may hold them behind
/// `Arc<dyn ProviderAdapter>` across tasks.
pub trait ProviderAdapter: Send + Sync {
    /// Unique provider identifier, recorded as provenance on every record.
    fn id(&self) -> ProviderId;

    /// Fetch a snapshot batch for the requested symbols.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] classified per [`FetchErrorKind`]; the
    /// coordinator's per-kind retry table depends on the classification
    /// being accurate.
    fn fetch<'a>(
        &'a self,
        req: QuoteRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<StockQuote>, FetchError>> + Send + 'a>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_symbol_set_is_rejected() {
        let window = TimeRange::at(UtcDateTime::now());
        let err = QuoteRequest::new(Vec::new(), window).expect_err("must fail");
        assert_eq!(err.kind(), FetchErrorKind::Malformed);
    }

    #[test]
    fn inverted_window_is_rejected() {
        let start = UtcDateTime::parse("2024-06-02T00:00:00Z").expect("timestamp");
        let end = UtcDateTime::parse("2024-06-01T00:00:00Z").expect("timestamp");
        let err = TimeRange::new(start, end).expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidTimeRange));
    }

    #[test]
    fn only_transport_errors_are_retryable() {
        assert!(FetchError::transport("boom").retryable());
        assert!(!FetchError::rate_limited("throttled").retryable());
        assert!(!FetchError::unauthorized("denied").retryable());
        assert!(!FetchError::malformed("garbage").retryable());
    }

    #[test]
    fn status_mapping_follows_taxonomy() {
        let err = FetchError::from_status(ProviderId::Sina, 403);
        assert_eq!(err.kind(), FetchErrorKind::Unauthorized);

        let err = FetchError::from_status(ProviderId::Sina, 456);
        assert_eq!(err.kind(), FetchErrorKind::RateLimited);

        let err = FetchError::from_status(ProviderId::Tencent, 502);
        assert_eq!(err.kind(), FetchErrorKind::Transport);
    }
}
