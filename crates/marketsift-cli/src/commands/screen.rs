use serde::Serialize;
use serde_json::Value;

use marketsift_core::Envelope;
use marketsift_screener::{ScreenedQuote, ScreenerService};

use crate::cli::ScreenArgs;
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct ScreenResponseData {
    strategy: String,
    matched: usize,
    records: Vec<ScreenedQuote>,
}

pub async fn run(
    args: &ScreenArgs,
    service: &ScreenerService,
) -> Result<Envelope<Value>, CliError> {
    let envelope = service
        .screen_and_score(&args.strategy, args.count)
        .await?;

    let data = serde_json::to_value(ScreenResponseData {
        strategy: args.strategy.clone(),
        matched: envelope.payload.len(),
        records: envelope.payload,
    })?;

    Ok(Envelope::new(envelope.meta, data))
}
