//! Resilient quote acquisition for China A-share snapshots.
//!
//! The crate is organized around one guarantee: a data request never fails
//! for lack of data. Real providers are consulted in a fixed priority order
//! (Sina, then Tencent, then Eastmoney), answers are cached under a TTL, and
//! when everything upstream is down a deterministic synthetic generator
//! answers instead. Provenance travels with every batch so callers can
//! always tell which source, real or synthetic, produced what they hold.
//!
//! Main entry point is [`AcquisitionCoordinator`]; screening and scoring
//! consumers live in downstream crates.

pub mod acquisition;
pub mod adapters;
pub mod cache;
pub mod clock;
pub mod directory;
mod domain;
pub mod envelope;
mod error;
pub mod http_client;
pub mod policy;
mod source;
pub mod synthetic;

pub use acquisition::AcquisitionCoordinator;
pub use adapters::{
    EastmoneyAdapter, FetchError, FetchErrorKind, ProviderAdapter, QuoteRequest, SinaAdapter,
    TencentAdapter, TimeRange,
};
pub use cache::{CacheKey, CachedBatch, QuoteCache, DEFAULT_QUOTE_TTL};
pub use clock::{Clock, ManualClock, SystemClock};
pub use domain::{
    Concept, Exchange, Growth, Industry, Profitability, StockQuote, Symbol, Technicals,
    UtcDateTime, Valuation,
};
pub use envelope::{new_request_id, Envelope, EnvelopeError, EnvelopeMeta};
pub use error::{CoreError, ValidationError};
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, NoopHttpClient, ReqwestHttpClient};
pub use policy::{ChainConfig, ProviderPolicy};
pub use source::ProviderId;
pub use synthetic::{PriceSnapshot, SyntheticGenerator};
