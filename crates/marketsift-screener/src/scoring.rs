//! Entry scoring: a pure function from rubric and record to a capped score
//! plus the signal phrases for every satisfied rubric line, in rubric order.

use marketsift_core::StockQuote;

use crate::strategy::ScoreRubric;

pub const MAX_SCORE: u8 = 100;

/// Score one record against a rubric.
pub fn score(rubric: &ScoreRubric, quote: &StockQuote) -> (u8, Vec<String>) {
    let mut total: u32 = 0;
    let mut signals = Vec::new();

    for rule in &rubric.rules {
        if rule.criterion.satisfied(quote) {
            total += u32::from(rule.points);
            signals.push(rule.text.render(quote));
        }
    }

    let capped = total.min(u32::from(MAX_SCORE)) as u8;
    (capped, signals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{
        DerivedSignal, FilterField, ScoreCriterion, ScoreRule, SignalText,
    };
    use marketsift_core::{Symbol, SyntheticGenerator};

    fn rubric() -> ScoreRubric {
        ScoreRubric {
            rules: vec![
                ScoreRule {
                    criterion: ScoreCriterion::Range {
                        field: FilterField::Rsi,
                        min: 50.0,
                        max: 80.0,
                    },
                    points: 40,
                    text: SignalText::Fixed("rsi in band"),
                },
                ScoreRule {
                    criterion: ScoreCriterion::Signal(DerivedSignal::MacdPositive),
                    points: 30,
                    text: SignalText::Fixed("macd above zero"),
                },
                ScoreRule {
                    criterion: ScoreCriterion::Always,
                    points: 10,
                    text: SignalText::Fixed("baseline"),
                },
            ],
        }
    }

    fn quote() -> StockQuote {
        SyntheticGenerator::new().generate(&Symbol::parse("600519").expect("symbol"))
    }

    #[test]
    fn sums_satisfied_rules_in_order() {
        let mut quote = quote();
        quote.technicals.rsi = 65.0;
        quote.technicals.macd = 0.5;

        let (points, signals) = score(&rubric(), &quote);
        assert_eq!(points, 80);
        assert_eq!(signals, vec!["rsi in band", "macd above zero", "baseline"]);
    }

    #[test]
    fn unsatisfied_rules_contribute_nothing() {
        let mut quote = quote();
        quote.technicals.rsi = 10.0;
        quote.technicals.macd = -0.5;

        let (points, signals) = score(&rubric(), &quote);
        assert_eq!(points, 10);
        assert_eq!(signals, vec!["baseline"]);
    }

    #[test]
    fn score_is_capped_at_one_hundred() {
        let overweight = ScoreRubric {
            rules: vec![
                ScoreRule {
                    criterion: ScoreCriterion::Always,
                    points: 90,
                    text: SignalText::Fixed("a"),
                },
                ScoreRule {
                    criterion: ScoreCriterion::Always,
                    points: 90,
                    text: SignalText::Fixed("b"),
                },
            ],
        };

        let (points, signals) = score(&overweight, &quote());
        assert_eq!(points, 100);
        assert_eq!(signals.len(), 2);
    }

    #[test]
    fn scoring_is_deterministic() {
        let quote = quote();
        assert_eq!(score(&rubric(), &quote), score(&rubric(), &quote));
    }
}
