//! Rule-based screening and entry scoring over marketsift quote batches.
//!
//! Strategies are immutable data interpreted by a small engine: tagged
//! filter rules, soft industry preference, hard industry exclusion, a
//! deterministic sort, and an optional scoring rubric for entry strategies.
//! [`ScreenerService`] wires the engine to an acquisition coordinator.

pub mod catalog;
pub mod screen;
pub mod scoring;
pub mod service;
pub mod strategy;

pub use catalog::StrategyCatalog;
pub use screen::screen;
pub use scoring::{score, MAX_SCORE};
pub use service::{ScreenError, ScreenedQuote, ScreenerService};
pub use strategy::{
    DerivedSignal, FilterField, FilterRule, ScoreCriterion, ScoreRubric, ScoreRule, SignalText,
    SortSpec, StrategyDefinition,
};
