use serde::Serialize;
use serde_json::Value;

use marketsift_core::{new_request_id, Envelope, EnvelopeMeta, ProviderId};
use marketsift_screener::{FilterRule, ScoreCriterion, ScoreRule, ScreenerService, StrategyDefinition};

use crate::cli::StrategiesArgs;
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct StrategySummary {
    key: &'static str,
    name: &'static str,
    description: &'static str,
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    filters: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rubric: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct StrategiesResponseData {
    strategies: Vec<StrategySummary>,
}

pub fn run(args: &StrategiesArgs, service: &ScreenerService) -> Result<Envelope<Value>, CliError> {
    let strategies = service
        .catalog()
        .iter()
        .map(|strategy| summarize(strategy, args.verbose))
        .collect();

    let data = serde_json::to_value(StrategiesResponseData { strategies })?;

    // The catalog is local; no upstream source is consulted.
    let meta = EnvelopeMeta::new(
        new_request_id(),
        vec![ProviderId::Synthetic],
        0,
        false,
        Vec::new(),
    )?;

    Ok(Envelope::new(meta, data))
}

fn summarize(strategy: &StrategyDefinition, verbose: bool) -> StrategySummary {
    let kind = if strategy.rubric.is_some() {
        "entry"
    } else {
        "screener"
    };

    let (filters, rubric) = if verbose {
        let filters = strategy.filters.iter().map(describe_filter).collect();
        let rubric = strategy
            .rubric
            .as_ref()
            .map(|rubric| rubric.rules.iter().map(describe_score_rule).collect());
        (Some(filters), rubric)
    } else {
        (None, None)
    };

    StrategySummary {
        key: strategy.key,
        name: strategy.name,
        description: strategy.description,
        kind,
        filters,
        rubric,
    }
}

fn describe_filter(rule: &FilterRule) -> String {
    match rule {
        FilterRule::Range { field, min, max } => {
            format!("{} in [{min}, {max}]", field.as_str())
        }
        FilterRule::Flag { signal, expected } => {
            format!("{} == {expected}", signal.as_str())
        }
    }
}

fn describe_score_rule(rule: &ScoreRule) -> String {
    let condition = match &rule.criterion {
        ScoreCriterion::Range { field, min, max } => {
            format!("{} in [{min}, {max}]", field.as_str())
        }
        ScoreCriterion::Signal(signal) => signal.as_str().to_owned(),
        ScoreCriterion::IndustryIn(industries) => {
            let names: Vec<&str> = industries
                .iter()
                .map(|industry| industry.as_str())
                .collect();
            format!("industry in [{}]", names.join(", "))
        }
        ScoreCriterion::Always => String::from("always"),
    };
    format!("{condition}: {} pts", rule.points)
}
