use serde::{Deserialize, Serialize};

use crate::{Concept, Industry, ProviderId, Symbol, UtcDateTime, ValidationError};

/// Valuation ratios. PE and PB carry `f64::NAN` when the ratio is not
/// meaningful; NaN fails every range filter, which is the defined behavior
/// for an undefined value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Valuation {
    pub pe: f64,
    pub pb: f64,
    pub market_cap: f64,
    pub dividend_yield: f64,
}

/// Profitability ratios, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Profitability {
    pub roe: f64,
    pub net_margin: f64,
    pub gross_margin: f64,
    pub debt_ratio: f64,
}

/// Year-over-year growth ratios, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Growth {
    pub revenue_growth: f64,
    pub profit_growth: f64,
}

/// Technical indicator snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Technicals {
    pub rsi: f64,
    pub macd: f64,
    pub kdj_k: f64,
    pub ma5: f64,
    pub ma10: f64,
    pub ma20: f64,
    pub volume_ratio: f64,
}

/// Canonical per-instrument snapshot.
///
/// Every producer (adapter or synthetic generator) must populate every field
/// the screening engine can filter on; the only permitted "missing" encoding
/// is the NaN sentinel on valuation ratios. [`StockQuote::validated`]
/// enforces this invariant at the production boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockQuote {
    pub symbol: Symbol,
    pub name: String,
    pub last_price: f64,
    pub change: f64,
    pub pct_change: f64,
    pub volume: u64,
    pub turnover: f64,
    pub turnover_rate: f64,
    pub valuation: Valuation,
    pub profitability: Profitability,
    pub growth: Growth,
    pub technicals: Technicals,
    pub industry: Industry,
    pub concept: Concept,
    pub source: ProviderId,
    pub as_of: UtcDateTime,
}

impl StockQuote {
    /// Validate the record-completeness invariant, consuming and returning
    /// the record so producers can end a build with `.validated()?`.
    pub fn validated(self) -> Result<Self, ValidationError> {
        require_positive("last_price", self.last_price)?;
        require_finite("change", self.change)?;
        require_finite("pct_change", self.pct_change)?;
        require_finite("turnover", self.turnover)?;
        require_finite("turnover_rate", self.turnover_rate)?;

        // NaN allowed: undefined ratio sentinel. Infinity never is.
        require_finite_or_nan("pe", self.valuation.pe)?;
        require_finite_or_nan("pb", self.valuation.pb)?;
        require_finite("market_cap", self.valuation.market_cap)?;
        require_finite("dividend_yield", self.valuation.dividend_yield)?;

        require_finite("roe", self.profitability.roe)?;
        require_finite("net_margin", self.profitability.net_margin)?;
        require_finite("gross_margin", self.profitability.gross_margin)?;
        require_finite("debt_ratio", self.profitability.debt_ratio)?;

        require_finite("revenue_growth", self.growth.revenue_growth)?;
        require_finite("profit_growth", self.growth.profit_growth)?;

        require_finite("rsi", self.technicals.rsi)?;
        require_finite("macd", self.technicals.macd)?;
        require_finite("kdj_k", self.technicals.kdj_k)?;
        require_positive("ma5", self.technicals.ma5)?;
        require_positive("ma10", self.technicals.ma10)?;
        require_positive("ma20", self.technicals.ma20)?;
        require_finite("volume_ratio", self.technicals.volume_ratio)?;

        Ok(self)
    }
}

fn require_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    Ok(())
}

fn require_finite_or_nan(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_infinite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    Ok(())
}

fn require_positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    require_finite(field, value)?;
    if value <= 0.0 {
        return Err(ValidationError::NonPositiveValue { field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SyntheticGenerator;

    #[test]
    fn synthetic_records_pass_validation() {
        let generator = SyntheticGenerator::default();
        let quote = generator.generate(&Symbol::parse("600519").expect("symbol"));
        assert!(quote.validated().is_ok());
    }

    #[test]
    fn rejects_non_positive_price() {
        let generator = SyntheticGenerator::default();
        let mut quote = generator.generate(&Symbol::parse("600519").expect("symbol"));
        quote.last_price = 0.0;
        let err = quote.validated().expect_err("must fail");
        assert!(matches!(
            err,
            ValidationError::NonPositiveValue {
                field: "last_price"
            }
        ));
    }

    #[test]
    fn nan_valuation_is_a_legal_sentinel() {
        let generator = SyntheticGenerator::default();
        let mut quote = generator.generate(&Symbol::parse("000001").expect("symbol"));
        quote.valuation.pe = f64::NAN;
        assert!(quote.validated().is_ok());
    }

    #[test]
    fn infinite_valuation_is_rejected() {
        let generator = SyntheticGenerator::default();
        let mut quote = generator.generate(&Symbol::parse("000001").expect("symbol"));
        quote.valuation.pb = f64::INFINITY;
        let err = quote.validated().expect_err("must fail");
        assert!(matches!(
            err,
            ValidationError::NonFiniteValue { field: "pb" }
        ));
    }
}
