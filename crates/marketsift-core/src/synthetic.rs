//! Deterministic last-resort record generator.
//!
//! Keeps every downstream component working when no upstream provider is
//! reachable: the rest of the system is written as if data always exists,
//! and only this module encodes upstream uncertainty. Generation is a pure
//! function of the symbol (seed = FNV-1a over the canonical rendering), so
//! repeated calls within one process yield identical records apart from the
//! retrieval timestamp. It is not a market model; fields merely stay inside
//! documented plausible ranges.

use crate::directory;
use crate::{
    Concept, Growth, Industry, Profitability, ProviderId, StockQuote, Symbol, Technicals,
    UtcDateTime, Valuation,
};

/// Price-level fields an adapter was able to read off the wire. The
/// generator completes the remaining record deterministically so adapter
/// output always satisfies the completeness invariant.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSnapshot {
    pub symbol: Symbol,
    pub name: String,
    pub last_price: f64,
    pub change: f64,
    pub pct_change: f64,
    pub volume: u64,
    pub turnover: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticGenerator;

impl SyntheticGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Fabricate a full record for one symbol. Cannot fail.
    pub fn generate(&self, symbol: &Symbol) -> StockQuote {
        let industry = directory::classify(symbol);
        let mut rng = rng_for(symbol);

        let last_price = round2(uniform(&mut rng, price_band(industry)));
        let pct_change = round2(uniform(&mut rng, (-10.0, 10.0)));
        let change = round2(last_price * pct_change / 100.0);

        let volume = rng.u64(1_000_000..=500_000_000);
        let turnover = round2(uniform(&mut rng, (1.0e8, 1.0e10)));

        let (turnover_rate, valuation, profitability, growth, technicals, concept) =
            secondary_fields(&mut rng, last_price);

        StockQuote {
            symbol: symbol.clone(),
            name: directory::display_name(symbol),
            last_price,
            change,
            pct_change,
            volume,
            turnover,
            turnover_rate,
            valuation,
            profitability,
            growth,
            technicals,
            industry,
            concept,
            source: ProviderId::Synthetic,
            as_of: UtcDateTime::now(),
        }
    }

    pub fn generate_batch(&self, symbols: &[Symbol]) -> Vec<StockQuote> {
        symbols.iter().map(|symbol| self.generate(symbol)).collect()
    }

    /// Complete a real wire snapshot into a full record. Secondary fields
    /// are seed-stable per symbol; moving averages anchor on the real price.
    pub fn complete(&self, snapshot: PriceSnapshot, source: ProviderId) -> StockQuote {
        let industry = directory::classify(&snapshot.symbol);
        let mut rng = rng_for(&snapshot.symbol);

        // Burn the draws the pure-synthetic path spends on price-level
        // fields so both paths agree on the secondary values for a symbol.
        let _ = uniform(&mut rng, price_band(industry));
        let _ = uniform(&mut rng, (-10.0, 10.0));
        let _ = rng.u64(1_000_000..=500_000_000);
        let _ = uniform(&mut rng, (1.0e8, 1.0e10));

        let (turnover_rate, valuation, profitability, growth, technicals, concept) =
            secondary_fields(&mut rng, snapshot.last_price);

        StockQuote {
            symbol: snapshot.symbol,
            name: snapshot.name,
            last_price: snapshot.last_price,
            change: snapshot.change,
            pct_change: snapshot.pct_change,
            volume: snapshot.volume,
            turnover: snapshot.turnover,
            turnover_rate,
            valuation,
            profitability,
            growth,
            technicals,
            industry,
            concept,
            source,
            as_of: UtcDateTime::now(),
        }
    }
}

fn secondary_fields(
    rng: &mut fastrand::Rng,
    last_price: f64,
) -> (f64, Valuation, Profitability, Growth, Technicals, Concept) {
    let turnover_rate = round2(uniform(rng, (0.1, 15.0)));

    let valuation = Valuation {
        pe: round2(uniform(rng, (5.0, 50.0))),
        pb: round2(uniform(rng, (0.5, 10.0))),
        market_cap: round2(uniform(rng, (1.0e9, 2.0e12))),
        dividend_yield: round2(uniform(rng, (0.0, 8.0))),
    };

    let profitability = Profitability {
        roe: round2(uniform(rng, (-5.0, 25.0))),
        net_margin: round2(uniform(rng, (-10.0, 30.0))),
        gross_margin: round2(uniform(rng, (10.0, 60.0))),
        debt_ratio: round2(uniform(rng, (20.0, 80.0))),
    };

    let growth = Growth {
        revenue_growth: round2(uniform(rng, (-20.0, 40.0))),
        profit_growth: round2(uniform(rng, (-30.0, 50.0))),
    };

    let technicals = Technicals {
        rsi: round2(uniform(rng, (20.0, 80.0))),
        macd: round3(uniform(rng, (-2.0, 2.0))),
        kdj_k: round2(uniform(rng, (0.0, 100.0))),
        ma5: round2(last_price * uniform(rng, (0.95, 1.05))),
        ma10: round2(last_price * uniform(rng, (0.9, 1.1))),
        ma20: round2(last_price * uniform(rng, (0.85, 1.15))),
        volume_ratio: round2(uniform(rng, (0.5, 5.0))),
    };

    let concept = Concept::ALL[rng.usize(..Concept::ALL.len())];

    (
        turnover_rate,
        valuation,
        profitability,
        growth,
        technicals,
        concept,
    )
}

/// Industry-banded base price, in CNY.
fn price_band(industry: Industry) -> (f64, f64) {
    match industry {
        Industry::Banking => (3.0, 8.0),
        Industry::Baijiu => (100.0, 2000.0),
        Industry::Technology | Industry::NewEnergy => (20.0, 200.0),
        _ => (5.0, 100.0),
    }
}

fn rng_for(symbol: &Symbol) -> fastrand::Rng {
    fastrand::Rng::with_seed(fnv1a(symbol.canonical().as_bytes()))
}

fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    let mut hash = OFFSET_BASIS;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}

fn uniform(rng: &mut fastrand::Rng, (lo, hi): (f64, f64)) -> f64 {
    lo + rng.f64() * (hi - lo)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_is_idempotent_per_symbol() {
        let generator = SyntheticGenerator::new();
        let symbol = Symbol::parse("000001").expect("symbol");

        let first = generator.generate(&symbol);
        let second = generator.generate(&symbol);

        assert_eq!(first.last_price, second.last_price);
        assert_eq!(first.pct_change, second.pct_change);
        assert_eq!(first.volume, second.volume);
        assert_eq!(first.valuation, second.valuation);
        assert_eq!(first.technicals, second.technicals);
        assert_eq!(first.concept, second.concept);
    }

    #[test]
    fn distinct_symbols_draw_distinct_records() {
        let generator = SyntheticGenerator::new();
        let a = generator.generate(&Symbol::parse("600519").expect("symbol"));
        let b = generator.generate(&Symbol::parse("600036").expect("symbol"));
        assert_ne!((a.last_price, a.volume), (b.last_price, b.volume));
    }

    #[test]
    fn fields_stay_in_documented_ranges() {
        let generator = SyntheticGenerator::new();
        for symbol in directory::default_universe() {
            let quote = generator.generate(&symbol);
            assert!(quote.last_price >= 1.0 && quote.last_price <= 2000.0);
            assert!(quote.pct_change >= -10.0 && quote.pct_change <= 10.0);
            assert!(quote.technicals.rsi >= 0.0 && quote.technicals.rsi <= 100.0);
            assert!(quote.technicals.kdj_k >= 0.0 && quote.technicals.kdj_k <= 100.0);
            assert_eq!(quote.source, ProviderId::Synthetic);
        }
    }

    #[test]
    fn completion_keeps_wire_price_and_seed_stable_secondaries() {
        let generator = SyntheticGenerator::new();
        let symbol = Symbol::parse("600519").expect("symbol");

        let snapshot = PriceSnapshot {
            symbol: symbol.clone(),
            name: String::from("贵州茅台"),
            last_price: 1701.5,
            change: 12.3,
            pct_change: 0.73,
            volume: 2_800_000,
            turnover: 4.76e9,
        };

        let completed = generator.complete(snapshot.clone(), ProviderId::Sina);
        assert_eq!(completed.last_price, 1701.5);
        assert_eq!(completed.source, ProviderId::Sina);

        let again = generator.complete(snapshot, ProviderId::Sina);
        assert_eq!(completed.valuation, again.valuation);
        assert_eq!(completed.technicals, again.technicals);
    }
}
