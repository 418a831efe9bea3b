//! Eastmoney realtime quote adapter.
//!
//! Endpoint: `http://push2.eastmoney.com/api/qt/ulist.np/get`, queried with
//! dot-separated secids (`1.600519` for Shanghai, `0.000001` for Shenzhen)
//! and an explicit field list. Unlike the other sources the payload is JSON;
//! `data` is null when no requested secid resolves.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;

use crate::adapters::{FetchError, ProviderAdapter, QuoteRequest};
use crate::http_client::{HttpClient, HttpRequest, NoopHttpClient};
use crate::synthetic::{PriceSnapshot, SyntheticGenerator};
use crate::{ProviderId, StockQuote, Symbol};

const ENDPOINT: &str = "http://push2.eastmoney.com/api/qt/ulist.np/get";
const FIELDS: &str = "f2,f3,f4,f5,f6,f12,f14";

pub struct EastmoneyAdapter {
    http: Arc<dyn HttpClient>,
    generator: SyntheticGenerator,
}

#[derive(Debug, Deserialize)]
struct UlistResponse {
    data: Option<UlistData>,
}

#[derive(Debug, Deserialize)]
struct UlistData {
    #[serde(default)]
    diff: Vec<UlistRow>,
}

/// One row of the ulist payload. Suspended instruments carry `"-"` instead
/// of a number, so every numeric field deserializes leniently.
#[derive(Debug, Deserialize)]
struct UlistRow {
    #[serde(default, deserialize_with = "lenient_f64")]
    f2: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    f3: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    f4: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    f5: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    f6: Option<f64>,
    #[serde(default)]
    f12: Option<String>,
    #[serde(default)]
    f14: Option<String>,
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64())
}

impl EastmoneyAdapter {
    pub fn with_http_client(http: Arc<dyn HttpClient>) -> Self {
        Self {
            http,
            generator: SyntheticGenerator::new(),
        }
    }

    fn parse_body(&self, body: &str, symbols: &[Symbol]) -> Result<Vec<StockQuote>, FetchError> {
        let response: UlistResponse = serde_json::from_str(body)
            .map_err(|error| FetchError::malformed(format!("eastmoney payload: {error}")))?;

        let Some(data) = response.data else {
            // Null data means no requested secid resolved; not a wire fault.
            return Ok(Vec::new());
        };

        let by_code: HashMap<&str, &Symbol> = symbols
            .iter()
            .map(|symbol| (symbol.code(), symbol))
            .collect();

        let mut quotes = Vec::new();
        for row in data.diff {
            let Some(symbol) = row.f12.as_deref().and_then(|code| by_code.get(code)) else {
                continue;
            };
            if let Some(snapshot) = parse_row((*symbol).clone(), &row) {
                quotes.push(self.generator.complete(snapshot, ProviderId::Eastmoney));
            }
        }

        Ok(quotes)
    }
}

impl Default for EastmoneyAdapter {
    fn default() -> Self {
        Self::with_http_client(Arc::new(NoopHttpClient))
    }
}

impl ProviderAdapter for EastmoneyAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Eastmoney
    }

    fn fetch<'a>(
        &'a self,
        req: QuoteRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<StockQuote>, FetchError>> + Send + 'a>> {
        Box::pin(async move {
            let secids = req
                .symbols
                .iter()
                .map(Symbol::secid)
                .collect::<Vec<_>>()
                .join(",");
            let url = format!(
                "{ENDPOINT}?fltt=2&secids={}&fields={}",
                urlencoding::encode(&secids),
                urlencoding::encode(FIELDS),
            );

            tracing::debug!(symbols = req.symbols.len(), "fetching eastmoney snapshot");

            let response = self.http.execute(HttpRequest::get(url)).await.map_err(
                |error| {
                    if error.timed_out() {
                        FetchError::transport(format!("eastmoney request timed out: {error}"))
                    } else {
                        FetchError::transport(format!("eastmoney request failed: {error}"))
                    }
                },
            )?;

            if !response.is_success() {
                return Err(FetchError::from_status(
                    ProviderId::Eastmoney,
                    response.status,
                ));
            }

            self.parse_body(&response.body, &req.symbols)
        })
    }
}

fn parse_row(symbol: Symbol, row: &UlistRow) -> Option<PriceSnapshot> {
    let name = row.f14.as_deref()?.trim();
    let last_price = row.f2?;
    let pct_change = row.f3?;
    let change = row.f4?;
    let volume_lots = row.f5?;
    let turnover = row.f6?;

    if last_price <= 0.0 || name.is_empty() {
        return None;
    }

    Some(PriceSnapshot {
        symbol,
        name: name.to_owned(),
        last_price,
        change,
        pct_change,
        volume: (volume_lots * 100.0) as u64,
        turnover,
    })
}
