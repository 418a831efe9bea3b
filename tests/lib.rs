// Shared imports for the behavior test suites.
pub use marketsift_core::{
    adapters::{FetchError, FetchErrorKind, ProviderAdapter, QuoteRequest},
    AcquisitionCoordinator, ChainConfig, ManualClock, ProviderId, QuoteCache, StockQuote, Symbol,
    SyntheticGenerator,
};
pub use marketsift_screener::{ScreenerService, StrategyCatalog};
pub use std::sync::Arc;
