use serde::Serialize;
use serde_json::Value;

use marketsift_core::{Envelope, StockQuote, Symbol, ValidationError};
use marketsift_screener::ScreenerService;

use crate::cli::QuoteArgs;
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct QuoteResponseData {
    quotes: Vec<StockQuote>,
}

pub async fn run(args: &QuoteArgs, service: &ScreenerService) -> Result<Envelope<Value>, CliError> {
    let symbols = args
        .symbols
        .iter()
        .map(|raw| Symbol::parse(raw))
        .collect::<Result<Vec<_>, ValidationError>>()?;

    let envelope = service.acquire(&symbols).await?;
    let data = serde_json::to_value(QuoteResponseData {
        quotes: envelope.payload,
    })?;

    Ok(Envelope::new(envelope.meta, data))
}
