//! Tencent realtime quote adapter.
//!
//! Endpoint: `http://qt.gtimg.cn/q=sh600519,sz000001`. The response is one
//! assignment per symbol, `v_sh600519="...";`, with `~`-delimited fields.
//! Volume is quoted in lots of 100 shares and turnover in units of ten
//! thousand CNY; both are normalized here.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::adapters::{FetchError, ProviderAdapter, QuoteRequest};
use crate::http_client::{HttpClient, HttpRequest, NoopHttpClient};
use crate::synthetic::{PriceSnapshot, SyntheticGenerator};
use crate::{ProviderId, StockQuote, Symbol};

const ENDPOINT: &str = "http://qt.gtimg.cn/q=";
const MIN_FIELDS: usize = 38;

pub struct TencentAdapter {
    http: Arc<dyn HttpClient>,
    generator: SyntheticGenerator,
}

impl TencentAdapter {
    pub fn with_http_client(http: Arc<dyn HttpClient>) -> Self {
        Self {
            http,
            generator: SyntheticGenerator::new(),
        }
    }

    fn parse_body(&self, body: &str, symbols: &[Symbol]) -> Result<Vec<StockQuote>, FetchError> {
        if body.trim().is_empty() {
            return Err(FetchError::malformed("tencent returned an empty body"));
        }

        let by_wire_code: HashMap<String, &Symbol> = symbols
            .iter()
            .map(|symbol| (symbol.wire_code(), symbol))
            .collect();

        let mut quotes = Vec::new();
        let mut matched_any = false;

        for line in body.lines() {
            let Some((wire_code, payload)) = split_assignment(line) else {
                continue;
            };
            matched_any = true;

            let Some(symbol) = by_wire_code.get(wire_code) else {
                continue;
            };

            if let Some(snapshot) = parse_record((*symbol).clone(), payload) {
                quotes.push(self.generator.complete(snapshot, ProviderId::Tencent));
            }
        }

        if !matched_any {
            return Err(FetchError::malformed(
                "tencent response contained no quote assignments",
            ));
        }

        Ok(quotes)
    }
}

impl Default for TencentAdapter {
    fn default() -> Self {
        Self::with_http_client(Arc::new(NoopHttpClient))
    }
}

impl ProviderAdapter for TencentAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Tencent
    }

    fn fetch<'a>(
        &'a self,
        req: QuoteRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<StockQuote>, FetchError>> + Send + 'a>> {
        Box::pin(async move {
            let list = req
                .symbols
                .iter()
                .map(Symbol::wire_code)
                .collect::<Vec<_>>()
                .join(",");
            let request = HttpRequest::get(format!("{ENDPOINT}{list}"));

            tracing::debug!(symbols = req.symbols.len(), "fetching tencent snapshot");

            let response = self.http.execute(request).await.map_err(|error| {
                if error.timed_out() {
                    FetchError::transport(format!("tencent request timed out: {error}"))
                } else {
                    FetchError::transport(format!("tencent request failed: {error}"))
                }
            })?;

            if !response.is_success() {
                return Err(FetchError::from_status(
                    ProviderId::Tencent,
                    response.status,
                ));
            }

            self.parse_body(&response.body, &req.symbols)
        })
    }
}

/// Split `v_sh600519="...";` into the wire code and the quoted payload.
fn split_assignment(line: &str) -> Option<(&str, &str)> {
    let rest = line.trim().strip_prefix("v_")?;
    let (wire_code, rest) = rest.split_once("=\"")?;
    let payload = rest.strip_suffix("\";").or_else(|| rest.strip_suffix('"'))?;
    Some((wire_code, payload))
}

fn parse_record(symbol: Symbol, payload: &str) -> Option<PriceSnapshot> {
    let fields: Vec<&str> = payload.split('~').collect();
    if fields.len() < MIN_FIELDS {
        return None;
    }

    let name = fields[1].trim();
    let last_price: f64 = fields[3].trim().parse().ok()?;
    let prev_close: f64 = fields[4].trim().parse().ok()?;
    let volume_lots: f64 = fields[6].trim().parse().ok()?;
    let turnover_wan: f64 = fields[37].trim().parse().ok()?;

    if last_price <= 0.0 || prev_close <= 0.0 || name.is_empty() {
        return None;
    }

    let change = round2(last_price - prev_close);
    let pct_change = round2(change / prev_close * 100.0);

    Some(PriceSnapshot {
        symbol,
        name: name.to_owned(),
        last_price,
        change,
        pct_change,
        volume: (volume_lots * 100.0) as u64,
        turnover: round2(turnover_wan * 10_000.0),
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
