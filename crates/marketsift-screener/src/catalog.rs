//! Built-in strategy catalog.
//!
//! Six screening strategies plus three entry strategies with scoring
//! rubrics. The catalog is constructed once and never mutated; strategy
//! keys are the stable lookup surface.

use marketsift_core::Industry;

use crate::strategy::{
    DerivedSignal, FilterField, FilterRule, ScoreCriterion, ScoreRubric, ScoreRule, SignalText,
    SortSpec, StrategyDefinition,
};

pub struct StrategyCatalog {
    strategies: Vec<StrategyDefinition>,
}

impl StrategyCatalog {
    /// The full built-in catalog, screeners first.
    pub fn builtin() -> Self {
        Self {
            strategies: vec![
                momentum_breakout(),
                value_growth(),
                dividend_stable(),
                small_cap_growth(),
                technical_strong(),
                oversold_rebound(),
                momentum_breakout_entry(),
                relative_strength_entry(),
                oversold_bounce_entry(),
            ],
        }
    }

    pub fn get(&self, key: &str) -> Option<&StrategyDefinition> {
        self.strategies
            .iter()
            .find(|strategy| strategy.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StrategyDefinition> {
        self.strategies.iter()
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

impl Default for StrategyCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn range(field: FilterField, min: f64, max: f64) -> FilterRule {
    FilterRule::Range { field, min, max }
}

fn flag(signal: DerivedSignal, expected: bool) -> FilterRule {
    FilterRule::Flag { signal, expected }
}

fn score_range(field: FilterField, min: f64, max: f64, points: u8, text: SignalText) -> ScoreRule {
    ScoreRule {
        criterion: ScoreCriterion::Range { field, min, max },
        points,
        text,
    }
}

fn score_signal(signal: DerivedSignal, points: u8, text: SignalText) -> ScoreRule {
    ScoreRule {
        criterion: ScoreCriterion::Signal(signal),
        points,
        text,
    }
}

fn score_industry(industries: &'static [Industry], points: u8, text: SignalText) -> ScoreRule {
    ScoreRule {
        criterion: ScoreCriterion::IndustryIn(industries),
        points,
        text,
    }
}

fn score_always(points: u8, text: SignalText) -> ScoreRule {
    ScoreRule {
        criterion: ScoreCriterion::Always,
        points,
        text,
    }
}

// Risk-control rubric lines shared by every entry strategy.
fn risk_control_rules() -> [ScoreRule; 2] {
    [
        score_range(
            FilterField::Pe,
            10.0,
            50.0,
            10,
            SignalText::Fixed("valuation in reasonable band"),
        ),
        score_range(
            FilterField::MarketCap,
            5.0e10,
            5.0e11,
            10,
            SignalText::Fixed("mid-to-large market cap"),
        ),
    ]
}

const MOMENTUM_ENTRY_INDUSTRIES: &[Industry] = &[
    Industry::Technology,
    Industry::NewEnergy,
    Industry::Pharmaceutical,
    Industry::Consumer,
];

const STRENGTH_ENTRY_INDUSTRIES: &[Industry] = &[
    Industry::Baijiu,
    Industry::Pharmaceutical,
    Industry::Consumer,
    Industry::Technology,
];

const BOUNCE_ENTRY_INDUSTRIES: &[Industry] = &[
    Industry::Consumer,
    Industry::Pharmaceutical,
    Industry::Baijiu,
];

/// Every entry rubric shares the same tail: industry preference, the fixed
/// market-environment line, and the risk-control lines. Only the technical
/// block varies per strategy.
fn entry_rubric(technical: Vec<ScoreRule>, industries: &'static [Industry]) -> ScoreRubric {
    let mut rules = technical;
    rules.push(score_industry(
        industries,
        20,
        SignalText::Fixed("favored industry group"),
    ));
    rules.push(score_always(15, SignalText::Fixed("market environment neutral")));
    rules.extend(risk_control_rules());
    ScoreRubric { rules }
}

fn momentum_breakout() -> StrategyDefinition {
    StrategyDefinition {
        key: "momentum_breakout",
        name: "Momentum breakout",
        description: "Rising names with expanding volume and a confirmed short-term trend",
        filters: vec![
            range(FilterField::PctChange, 2.0, 10.0),
            range(FilterField::Rsi, 50.0, 80.0),
            range(FilterField::VolumeRatio, 1.5, 5.0),
            flag(DerivedSignal::Ma5AboveMa20, true),
        ],
        preferred_industries: vec![
            Industry::Technology,
            Industry::NewEnergy,
            Industry::Pharmaceutical,
        ],
        excluded_industries: vec![Industry::Banking],
        sort: SortSpec {
            field: FilterField::PctChange,
            descending: true,
        },
        rubric: None,
    }
}

fn value_growth() -> StrategyDefinition {
    StrategyDefinition {
        key: "value_growth",
        name: "Value growth",
        description: "Reasonably priced compounders with double-digit growth",
        filters: vec![
            range(FilterField::Pe, 5.0, 25.0),
            range(FilterField::Pb, 0.5, 3.0),
            range(FilterField::Roe, 15.0, 50.0),
            range(FilterField::RevenueGrowth, 10.0, 50.0),
            range(FilterField::ProfitGrowth, 10.0, 50.0),
        ],
        preferred_industries: vec![
            Industry::Consumer,
            Industry::Pharmaceutical,
            Industry::Baijiu,
        ],
        excluded_industries: Vec::new(),
        sort: SortSpec {
            field: FilterField::Roe,
            descending: true,
        },
        rubric: None,
    }
}

fn dividend_stable() -> StrategyDefinition {
    StrategyDefinition {
        key: "dividend_stable",
        name: "Dividend stable",
        description: "High-yield names with conservative balance sheets",
        filters: vec![
            range(FilterField::DividendYield, 2.0, 8.0),
            range(FilterField::Roe, 8.0, 35.0),
            range(FilterField::Pe, 3.0, 25.0),
            range(FilterField::DebtRatio, 15.0, 70.0),
            range(FilterField::NetMargin, 5.0, 35.0),
        ],
        preferred_industries: vec![Industry::Banking, Industry::Brokerage, Industry::Consumer],
        excluded_industries: vec![Industry::NewEnergy],
        sort: SortSpec {
            field: FilterField::DividendYield,
            descending: true,
        },
        rubric: None,
    }
}

fn small_cap_growth() -> StrategyDefinition {
    StrategyDefinition {
        key: "small_cap_growth",
        name: "Small-cap growth",
        description: "Smaller companies growing revenue and profit fast",
        filters: vec![
            range(FilterField::MarketCap, 1.0e9, 2.0e10),
            range(FilterField::RevenueGrowth, 20.0, 100.0),
            range(FilterField::ProfitGrowth, 25.0, 100.0),
            range(FilterField::Roe, 15.0, 50.0),
            range(FilterField::Pe, 10.0, 40.0),
        ],
        preferred_industries: vec![
            Industry::Technology,
            Industry::NewEnergy,
            Industry::Pharmaceutical,
        ],
        excluded_industries: vec![Industry::Banking, Industry::Brokerage],
        sort: SortSpec {
            field: FilterField::RevenueGrowth,
            descending: true,
        },
        rubric: None,
    }
}

fn technical_strong() -> StrategyDefinition {
    StrategyDefinition {
        key: "technical_strong",
        name: "Technically strong",
        description: "Names where every major indicator points up",
        filters: vec![
            range(FilterField::Rsi, 60.0, 85.0),
            range(FilterField::Macd, 0.0, 2.0),
            range(FilterField::KdjK, 70.0, 95.0),
            range(FilterField::PctChange, 0.0, 15.0),
            range(FilterField::VolumeRatio, 1.2, 4.0),
        ],
        preferred_industries: vec![
            Industry::Technology,
            Industry::NewEnergy,
            Industry::Consumer,
        ],
        excluded_industries: Vec::new(),
        sort: SortSpec {
            field: FilterField::Rsi,
            descending: true,
        },
        rubric: None,
    }
}

fn oversold_rebound() -> StrategyDefinition {
    StrategyDefinition {
        key: "oversold_rebound",
        name: "Oversold rebound",
        description: "Beaten-down names showing the first signs of a turn",
        filters: vec![
            range(FilterField::Rsi, 20.0, 45.0),
            range(FilterField::PctChange, -15.0, 0.0),
            range(FilterField::VolumeRatio, 1.2, 5.0),
            range(FilterField::Pb, 0.5, 3.0),
            range(FilterField::KdjK, 10.0, 50.0),
        ],
        preferred_industries: vec![
            Industry::Consumer,
            Industry::Pharmaceutical,
            Industry::Baijiu,
        ],
        excluded_industries: Vec::new(),
        // Deepest fallers first.
        sort: SortSpec {
            field: FilterField::PctChange,
            descending: false,
        },
        rubric: None,
    }
}

fn momentum_breakout_entry() -> StrategyDefinition {
    StrategyDefinition {
        key: "momentum_breakout_entry",
        name: "Momentum breakout entry",
        description: "Entry timing for names already breaking out on volume",
        filters: vec![
            range(FilterField::PctChange, 1.0, 9.0),
            range(FilterField::VolumeRatio, 1.5, 5.0),
            range(FilterField::Rsi, 50.0, 75.0),
            flag(DerivedSignal::PriceAboveMa5, true),
        ],
        preferred_industries: MOMENTUM_ENTRY_INDUSTRIES.to_vec(),
        excluded_industries: vec![Industry::Banking],
        sort: SortSpec {
            field: FilterField::PctChange,
            descending: true,
        },
        rubric: Some(entry_rubric(
            vec![
                score_range(
                    FilterField::PctChange,
                    2.0,
                    9.0,
                    15,
                    SignalText::Fixed("strong intraday momentum"),
                ),
                score_range(
                    FilterField::VolumeRatio,
                    2.0,
                    5.0,
                    15,
                    SignalText::VolumeSurge,
                ),
                score_range(
                    FilterField::Rsi,
                    50.0,
                    75.0,
                    10,
                    SignalText::Fixed("rsi in momentum band"),
                ),
            ],
            MOMENTUM_ENTRY_INDUSTRIES,
        )),
    }
}

fn relative_strength_entry() -> StrategyDefinition {
    StrategyDefinition {
        key: "relative_strength_entry",
        name: "Relative strength entry",
        description: "Entry timing for names leading on every oscillator",
        filters: vec![
            range(FilterField::Rsi, 55.0, 80.0),
            range(FilterField::Macd, 0.0, 2.0),
            range(FilterField::KdjK, 60.0, 95.0),
        ],
        preferred_industries: STRENGTH_ENTRY_INDUSTRIES.to_vec(),
        excluded_industries: Vec::new(),
        sort: SortSpec {
            field: FilterField::Rsi,
            descending: true,
        },
        rubric: Some(entry_rubric(
            vec![
                score_range(
                    FilterField::Rsi,
                    60.0,
                    80.0,
                    20,
                    SignalText::Fixed("rsi in strength band"),
                ),
                score_signal(
                    DerivedSignal::MacdPositive,
                    10,
                    SignalText::Fixed("macd above zero"),
                ),
                score_range(
                    FilterField::VolumeRatio,
                    1.2,
                    6.0,
                    10,
                    SignalText::VolumeSurge,
                ),
            ],
            STRENGTH_ENTRY_INDUSTRIES,
        )),
    }
}

fn oversold_bounce_entry() -> StrategyDefinition {
    StrategyDefinition {
        key: "oversold_bounce_entry",
        name: "Oversold bounce entry",
        description: "Entry timing for washed-out names starting to stabilize",
        filters: vec![
            range(FilterField::Rsi, 20.0, 40.0),
            range(FilterField::PctChange, -12.0, 0.0),
            range(FilterField::Pb, 0.5, 4.0),
        ],
        preferred_industries: BOUNCE_ENTRY_INDUSTRIES.to_vec(),
        excluded_industries: Vec::new(),
        sort: SortSpec {
            field: FilterField::Rsi,
            descending: false,
        },
        rubric: Some(entry_rubric(
            vec![
                score_range(
                    FilterField::Rsi,
                    20.0,
                    32.0,
                    20,
                    SignalText::Fixed("deep oversold"),
                ),
                score_range(
                    FilterField::PctChange,
                    -5.0,
                    0.0,
                    10,
                    SignalText::Fixed("decline stabilizing"),
                ),
                score_range(
                    FilterField::VolumeRatio,
                    1.5,
                    5.0,
                    10,
                    SignalText::VolumeSurge,
                ),
            ],
            BOUNCE_ENTRY_INDUSTRIES,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_nine_strategies_with_unique_keys() {
        let catalog = StrategyCatalog::builtin();
        assert_eq!(catalog.len(), 9);

        let mut keys: Vec<_> = catalog.iter().map(|strategy| strategy.key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), 9);
    }

    #[test]
    fn entry_strategies_carry_rubrics_and_screeners_do_not() {
        let catalog = StrategyCatalog::builtin();
        for strategy in catalog.iter() {
            let is_entry = strategy.key.ends_with("_entry");
            assert_eq!(strategy.rubric.is_some(), is_entry, "{}", strategy.key);
        }
    }

    #[test]
    fn rubric_points_never_exceed_the_score_scale() {
        let catalog = StrategyCatalog::builtin();
        for strategy in catalog.iter() {
            if let Some(rubric) = &strategy.rubric {
                let total: u32 = rubric.rules.iter().map(|rule| u32::from(rule.points)).sum();
                assert!(total <= 100, "{} rubric totals {total}", strategy.key);
            }
        }
    }

    #[test]
    fn every_strategy_names_preferred_industries() {
        let catalog = StrategyCatalog::builtin();
        for strategy in catalog.iter() {
            assert!(
                !strategy.preferred_industries.is_empty(),
                "{} has no preference set",
                strategy.key
            );
        }
    }

    #[test]
    fn entry_rubrics_carry_industry_and_risk_control_lines() {
        let catalog = StrategyCatalog::builtin();
        for strategy in catalog.iter() {
            let Some(rubric) = &strategy.rubric else {
                continue;
            };

            let industry_lines: Vec<_> = rubric
                .rules
                .iter()
                .filter_map(|rule| match rule.criterion {
                    ScoreCriterion::IndustryIn(set) => Some((set, rule.points)),
                    _ => None,
                })
                .collect();
            assert_eq!(industry_lines.len(), 1, "{}", strategy.key);
            let (set, points) = industry_lines[0];
            assert_eq!(points, 20, "{}", strategy.key);
            assert_eq!(set, strategy.preferred_industries.as_slice(), "{}", strategy.key);

            let has_valuation_line = rubric.rules.iter().any(|rule| {
                matches!(
                    rule.criterion,
                    ScoreCriterion::Range {
                        field: FilterField::Pe,
                        ..
                    }
                )
            });
            let has_market_cap_line = rubric.rules.iter().any(|rule| {
                matches!(
                    rule.criterion,
                    ScoreCriterion::Range {
                        field: FilterField::MarketCap,
                        ..
                    }
                )
            });
            assert!(has_valuation_line, "{}", strategy.key);
            assert!(has_market_cap_line, "{}", strategy.key);
        }
    }

    #[test]
    fn lookup_by_key() {
        let catalog = StrategyCatalog::builtin();
        assert!(catalog.get("momentum_breakout").is_some());
        assert!(catalog.get("no_such_strategy").is_none());
    }
}
