//! Screening service: the acquisition-to-screening seam.
//!
//! Owns an acquisition coordinator and the strategy catalog. Acquisition
//! resilience means the only error a caller can hit in practice is asking
//! for a strategy that does not exist.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use marketsift_core::{
    directory, AcquisitionCoordinator, CoreError, Envelope, StockQuote, Symbol,
};

use crate::catalog::StrategyCatalog;
use crate::screen::screen;
use crate::scoring::score;

#[derive(Debug, Error)]
pub enum ScreenError {
    #[error("unknown strategy '{key}'")]
    UnknownStrategy { key: String },
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// A screened record, with the entry score attached when the strategy
/// carries a rubric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenedQuote {
    #[serde(flatten)]
    pub quote: StockQuote,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_score: Option<u8>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entry_signals: Vec<String>,
}

pub struct ScreenerService {
    coordinator: AcquisitionCoordinator,
    catalog: StrategyCatalog,
}

impl ScreenerService {
    pub fn new(coordinator: AcquisitionCoordinator) -> Self {
        Self::with_catalog(coordinator, StrategyCatalog::builtin())
    }

    pub fn with_catalog(coordinator: AcquisitionCoordinator, catalog: StrategyCatalog) -> Self {
        Self {
            coordinator,
            catalog,
        }
    }

    pub fn catalog(&self) -> &StrategyCatalog {
        &self.catalog
    }

    /// Acquire a quote batch for explicit symbols.
    ///
    /// # Errors
    ///
    /// Only request validation can fail; see
    /// [`AcquisitionCoordinator::acquire`].
    pub async fn acquire(
        &self,
        symbols: &[Symbol],
    ) -> Result<Envelope<Vec<StockQuote>>, ScreenError> {
        Ok(self.coordinator.acquire(symbols).await?)
    }

    /// Run a strategy over the default universe and return at most `count`
    /// screened records, scored when the strategy has a rubric.
    ///
    /// # Errors
    ///
    /// [`ScreenError::UnknownStrategy`] when `key` is not in the catalog.
    pub async fn screen_and_score(
        &self,
        key: &str,
        count: usize,
    ) -> Result<Envelope<Vec<ScreenedQuote>>, ScreenError> {
        let strategy = self
            .catalog
            .get(key)
            .ok_or_else(|| ScreenError::UnknownStrategy {
                key: key.to_owned(),
            })?;

        // Fetch wider than the requested count so the filters have
        // something to reject, capped at the universe.
        let universe = directory::default_universe();
        let breadth = count.saturating_mul(3).max(count).min(universe.len());
        let envelope = self.coordinator.acquire(&universe[..breadth]).await?;

        let matched = screen(strategy, &envelope.payload, count);
        tracing::info!(
            strategy = strategy.key,
            fetched = envelope.payload.len(),
            matched = matched.len(),
            source = %envelope.meta.served_by(),
            "screen and score"
        );

        let screened = matched
            .into_iter()
            .map(|quote| match &strategy.rubric {
                Some(rubric) => {
                    let (entry_score, entry_signals) = score(rubric, &quote);
                    ScreenedQuote {
                        quote,
                        entry_score: Some(entry_score),
                        entry_signals,
                    }
                }
                None => ScreenedQuote {
                    quote,
                    entry_score: None,
                    entry_signals: Vec::new(),
                },
            })
            .collect();

        Ok(Envelope::new(envelope.meta, screened))
    }
}
