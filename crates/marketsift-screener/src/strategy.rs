//! Strategy vocabulary: filterable fields, derived signals, filter rules,
//! and scoring rubrics.
//!
//! A strategy is data, not code. The catalog builds definitions out of these
//! pieces once at startup and the engine interprets them; nothing here knows
//! where quote batches come from.

use marketsift_core::{Industry, StockQuote};

/// Numeric fields a filter or sort can address on a quote record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    PctChange,
    TurnoverRate,
    Pe,
    Pb,
    MarketCap,
    DividendYield,
    Roe,
    NetMargin,
    DebtRatio,
    RevenueGrowth,
    ProfitGrowth,
    Rsi,
    Macd,
    KdjK,
    VolumeRatio,
}

impl FilterField {
    pub fn value(self, quote: &StockQuote) -> f64 {
        match self {
            Self::PctChange => quote.pct_change,
            Self::TurnoverRate => quote.turnover_rate,
            Self::Pe => quote.valuation.pe,
            Self::Pb => quote.valuation.pb,
            Self::MarketCap => quote.valuation.market_cap,
            Self::DividendYield => quote.valuation.dividend_yield,
            Self::Roe => quote.profitability.roe,
            Self::NetMargin => quote.profitability.net_margin,
            Self::DebtRatio => quote.profitability.debt_ratio,
            Self::RevenueGrowth => quote.growth.revenue_growth,
            Self::ProfitGrowth => quote.growth.profit_growth,
            Self::Rsi => quote.technicals.rsi,
            Self::Macd => quote.technicals.macd,
            Self::KdjK => quote.technicals.kdj_k,
            Self::VolumeRatio => quote.technicals.volume_ratio,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PctChange => "pct_change",
            Self::TurnoverRate => "turnover_rate",
            Self::Pe => "pe",
            Self::Pb => "pb",
            Self::MarketCap => "market_cap",
            Self::DividendYield => "dividend_yield",
            Self::Roe => "roe",
            Self::NetMargin => "net_margin",
            Self::DebtRatio => "debt_ratio",
            Self::RevenueGrowth => "revenue_growth",
            Self::ProfitGrowth => "profit_growth",
            Self::Rsi => "rsi",
            Self::Macd => "macd",
            Self::KdjK => "kdj_k",
            Self::VolumeRatio => "volume_ratio",
        }
    }
}

/// Boolean conditions derived from relations between record fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivedSignal {
    Ma5AboveMa20,
    PriceAboveMa5,
    MacdPositive,
}

impl DerivedSignal {
    pub fn holds(self, quote: &StockQuote) -> bool {
        match self {
            Self::Ma5AboveMa20 => quote.technicals.ma5 > quote.technicals.ma20,
            Self::PriceAboveMa5 => quote.last_price > quote.technicals.ma5,
            Self::MacdPositive => quote.technicals.macd > 0.0,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ma5AboveMa20 => "ma5_above_ma20",
            Self::PriceAboveMa5 => "price_above_ma5",
            Self::MacdPositive => "macd_positive",
        }
    }
}

/// One screening predicate. Range bounds are inclusive; a NaN field value
/// fails the range, which is how an undefined ratio opts a record out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterRule {
    Range {
        field: FilterField,
        min: f64,
        max: f64,
    },
    Flag {
        signal: DerivedSignal,
        expected: bool,
    },
}

impl FilterRule {
    pub fn matches(&self, quote: &StockQuote) -> bool {
        match self {
            Self::Range { field, min, max } => {
                let value = field.value(quote);
                value >= *min && value <= *max
            }
            Self::Flag { signal, expected } => signal.holds(quote) == *expected,
        }
    }
}

/// Deterministic ordering for the screened result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: FilterField,
    pub descending: bool,
}

/// Human-readable phrase attached to a satisfied scoring rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalText {
    Fixed(&'static str),
    /// Renders the record's volume ratio, e.g. `volume surge 2.3x`.
    VolumeSurge,
}

impl SignalText {
    pub fn render(self, quote: &StockQuote) -> String {
        match self {
            Self::Fixed(text) => text.to_owned(),
            Self::VolumeSurge => {
                format!("volume surge {:.1}x", quote.technicals.volume_ratio)
            }
        }
    }
}

/// Condition a scoring rule checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoreCriterion {
    Range {
        field: FilterField,
        min: f64,
        max: f64,
    },
    Signal(DerivedSignal),
    /// Membership of the record's industry in a favored set.
    IndustryIn(&'static [Industry]),
    /// Unconditional contribution, used for baseline rubric lines.
    Always,
}

impl ScoreCriterion {
    pub fn satisfied(&self, quote: &StockQuote) -> bool {
        match self {
            Self::Range { field, min, max } => {
                let value = field.value(quote);
                value >= *min && value <= *max
            }
            Self::Signal(signal) => signal.holds(quote),
            Self::IndustryIn(industries) => industries.contains(&quote.industry),
            Self::Always => true,
        }
    }
}

/// One line of an entry rubric: points awarded and the phrase emitted when
/// the criterion holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreRule {
    pub criterion: ScoreCriterion,
    pub points: u8,
    pub text: SignalText,
}

/// Ordered scoring rubric. Signal phrases are emitted in rule order.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRubric {
    pub rules: Vec<ScoreRule>,
}

/// A complete, immutable strategy definition.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyDefinition {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub filters: Vec<FilterRule>,
    /// Soft preference: applied only when at least one surviving record
    /// belongs to a preferred industry.
    pub preferred_industries: Vec<Industry>,
    /// Hard exclusion: records in these industries never pass.
    pub excluded_industries: Vec<Industry>,
    pub sort: SortSpec,
    /// Present on entry strategies only.
    pub rubric: Option<ScoreRubric>,
}
