//! Canonical domain types for marketsift quote data.
//!
//! All models validate their invariants at the production boundary: a
//! [`StockQuote`] that reaches the screening engine is guaranteed complete,
//! with the NaN sentinel on valuation ratios as the only encoding of an
//! undefined value.

mod industry;
mod quote;
mod symbol;
mod timestamp;

pub use industry::{Concept, Industry};
pub use quote::{Growth, Profitability, StockQuote, Technicals, Valuation};
pub use symbol::{Exchange, Symbol};
pub use timestamp::UtcDateTime;
