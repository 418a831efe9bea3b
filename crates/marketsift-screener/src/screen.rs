//! The screening pipeline.
//!
//! Stages run in a fixed order: filter rules, soft industry preference, hard
//! industry exclusion, deterministic sort, truncation. A strategy that
//! matches fewer records than requested returns fewer records; nothing is
//! ever backfilled to pad the result.

use std::cmp::Ordering;

use marketsift_core::StockQuote;

use crate::strategy::StrategyDefinition;

/// Screen a quote batch through a strategy, returning at most `limit`
/// records in the strategy's sort order.
pub fn screen(strategy: &StrategyDefinition, quotes: &[StockQuote], limit: usize) -> Vec<StockQuote> {
    let mut survivors: Vec<&StockQuote> = quotes
        .iter()
        .filter(|quote| strategy.filters.iter().all(|rule| rule.matches(quote)))
        .collect();

    // Soft preference: narrow to preferred industries only when doing so
    // leaves something. Runs before the exclusion, so the narrowing decision
    // sees every record that passed the filters.
    if !strategy.preferred_industries.is_empty() {
        let preferred: Vec<&StockQuote> = survivors
            .iter()
            .copied()
            .filter(|quote| strategy.preferred_industries.contains(&quote.industry))
            .collect();
        if !preferred.is_empty() {
            survivors = preferred;
        }
    }

    survivors.retain(|quote| !strategy.excluded_industries.contains(&quote.industry));

    survivors.sort_by(|a, b| {
        let primary = compare_values(
            strategy.sort.field.value(a),
            strategy.sort.field.value(b),
            strategy.sort.descending,
        );
        primary.then_with(|| a.symbol.cmp(&b.symbol))
    });

    tracing::debug!(
        strategy = strategy.key,
        input = quotes.len(),
        matched = survivors.len(),
        limit,
        "screen complete"
    );

    survivors.truncate(limit);
    survivors.into_iter().cloned().collect()
}

/// NaN sorts below every number regardless of direction, so records with an
/// undefined sort field land at the tail of a descending result.
fn compare_values(a: f64, b: f64, descending: bool) -> Ordering {
    let ordering = match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => a.total_cmp(&b),
    };
    if descending {
        ordering.reverse()
    } else {
        ordering
    }
}
