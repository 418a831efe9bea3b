//! Behavior-driven tests for the acquisition chain.
//!
//! These tests verify HOW the coordinator walks the provider chain: fallback
//! ordering, per-kind retry behavior, cache TTL, deadlines, and the synthetic
//! floor that keeps acquisition infallible.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use marketsift_core::{
    adapters::{FetchError, ProviderAdapter, QuoteRequest},
    AcquisitionCoordinator, ChainConfig, ManualClock, ProviderId, QuoteCache, StockQuote, Symbol,
    SyntheticGenerator,
};

// =============================================================================
// Test doubles
// =============================================================================

/// Adapter that replays a scripted sequence of responses. Once the script is
/// exhausted it keeps returning the last response.
struct ScriptedAdapter {
    id: ProviderId,
    script: Mutex<VecDeque<Result<Vec<StockQuote>, FetchError>>>,
    last: Result<Vec<StockQuote>, FetchError>,
    calls: AtomicUsize,
}

impl ScriptedAdapter {
    fn new(id: ProviderId, script: Vec<Result<Vec<StockQuote>, FetchError>>) -> Arc<Self> {
        let last = script
            .last()
            .cloned()
            .unwrap_or_else(|| Err(FetchError::transport("script is empty")));
        Arc::new(Self {
            id,
            script: Mutex::new(script.into()),
            last,
            calls: AtomicUsize::new(0),
        })
    }

    fn always(id: ProviderId, response: Result<Vec<StockQuote>, FetchError>) -> Arc<Self> {
        Self::new(id, vec![response])
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ProviderAdapter for ScriptedAdapter {
    fn id(&self) -> ProviderId {
        self.id
    }

    fn fetch<'a>(
        &'a self,
        _req: QuoteRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<StockQuote>, FetchError>> + Send + 'a>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let response = self
            .script
            .lock()
            .expect("script lock")
            .pop_front()
            .unwrap_or_else(|| self.last.clone());
        Box::pin(async move { response })
    }
}

/// Adapter that never answers within any reasonable deadline.
struct StallingAdapter {
    id: ProviderId,
}

impl ProviderAdapter for StallingAdapter {
    fn id(&self) -> ProviderId {
        self.id
    }

    fn fetch<'a>(
        &'a self,
        _req: QuoteRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<StockQuote>, FetchError>> + Send + 'a>> {
        Box::pin(async move {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Err(FetchError::transport("unreachable"))
        })
    }
}

fn symbols(codes: &[&str]) -> Vec<Symbol> {
    codes
        .iter()
        .map(|code| Symbol::parse(code).expect("valid symbol"))
        .collect()
}

/// A batch a stub adapter can hand back, tagged with its provenance.
fn batch_from(provider: ProviderId, set: &[Symbol]) -> Vec<StockQuote> {
    SyntheticGenerator::new()
        .generate_batch(set)
        .into_iter()
        .map(|mut quote| {
            quote.source = provider;
            quote
        })
        .collect()
}

// =============================================================================
// Fallback ordering
// =============================================================================

#[tokio::test]
async fn when_earlier_sources_fail_the_chain_falls_through_in_order() {
    // Given: Sina always fails transport, Tencent is unauthorized, Eastmoney works
    let set = symbols(&["600519", "000001"]);
    let sina = ScriptedAdapter::always(ProviderId::Sina, Err(FetchError::transport("down")));
    let tencent =
        ScriptedAdapter::always(ProviderId::Tencent, Err(FetchError::unauthorized("denied")));
    let eastmoney =
        ScriptedAdapter::always(ProviderId::Eastmoney, Ok(batch_from(ProviderId::Eastmoney, &set)));

    let coordinator = AcquisitionCoordinator::with_adapters(
        vec![sina.clone(), tencent.clone(), eastmoney.clone()],
        ChainConfig::default(),
    );

    // When: a batch is acquired
    let envelope = coordinator.acquire(&set).await.expect("acquire succeeds");

    // Then: the third source served the batch and the whole walk is recorded
    assert_eq!(envelope.meta.served_by(), ProviderId::Eastmoney);
    assert_eq!(
        envelope.meta.source_chain,
        vec![ProviderId::Sina, ProviderId::Tencent, ProviderId::Eastmoney]
    );
    assert_eq!(envelope.payload.len(), 2);

    // Sina's transport failures burned the full retry budget (2 retries),
    // Tencent's auth failure was not retried at all.
    assert_eq!(sina.calls(), 3);
    assert_eq!(tencent.calls(), 1);
    assert_eq!(eastmoney.calls(), 1);
    assert_eq!(envelope.meta.errors.len(), 4);
}

#[tokio::test]
async fn when_the_first_source_answers_later_sources_are_never_consulted() {
    let set = symbols(&["600036"]);
    let sina = ScriptedAdapter::always(ProviderId::Sina, Ok(batch_from(ProviderId::Sina, &set)));
    let tencent = ScriptedAdapter::always(ProviderId::Tencent, Err(FetchError::transport("down")));

    let coordinator = AcquisitionCoordinator::with_adapters(
        vec![sina.clone(), tencent.clone()],
        ChainConfig::default(),
    );

    let envelope = coordinator.acquire(&set).await.expect("acquire succeeds");

    assert_eq!(envelope.meta.source_chain, vec![ProviderId::Sina]);
    assert!(envelope.meta.errors.is_empty());
    assert_eq!(tencent.calls(), 0);
}

#[tokio::test]
async fn when_a_source_is_rate_limited_it_is_not_retried() {
    let set = symbols(&["600519"]);
    let sina = ScriptedAdapter::always(ProviderId::Sina, Err(FetchError::rate_limited("429")));
    let tencent =
        ScriptedAdapter::always(ProviderId::Tencent, Ok(batch_from(ProviderId::Tencent, &set)));

    let coordinator = AcquisitionCoordinator::with_adapters(
        vec![sina.clone(), tencent],
        ChainConfig::default(),
    );

    let envelope = coordinator.acquire(&set).await.expect("acquire succeeds");

    // Rate limiting moves on immediately despite Sina's retry budget.
    assert_eq!(sina.calls(), 1);
    assert_eq!(envelope.meta.served_by(), ProviderId::Tencent);
}

#[tokio::test]
async fn when_a_source_returns_an_empty_batch_the_chain_moves_on() {
    let set = symbols(&["600519", "000001"]);
    let sina = ScriptedAdapter::always(ProviderId::Sina, Ok(Vec::new()));
    let tencent =
        ScriptedAdapter::always(ProviderId::Tencent, Ok(batch_from(ProviderId::Tencent, &set)));

    let coordinator = AcquisitionCoordinator::with_adapters(
        vec![sina.clone(), tencent],
        ChainConfig::default(),
    );

    let envelope = coordinator.acquire(&set).await.expect("acquire succeeds");

    // An empty answer is not a commit, and not worth a retry either.
    assert_eq!(sina.calls(), 1);
    assert_eq!(envelope.meta.served_by(), ProviderId::Tencent);
    assert!(envelope
        .meta
        .errors
        .iter()
        .any(|error| error.code == "fetch.empty_result"));
}

#[tokio::test]
async fn when_a_transient_failure_clears_the_same_source_serves_the_batch() {
    let set = symbols(&["300750"]);
    let sina = ScriptedAdapter::new(
        ProviderId::Sina,
        vec![
            Err(FetchError::transport("blip")),
            Ok(batch_from(ProviderId::Sina, &set)),
        ],
    );

    let coordinator =
        AcquisitionCoordinator::with_adapters(vec![sina.clone()], ChainConfig::default());

    let envelope = coordinator.acquire(&set).await.expect("acquire succeeds");

    assert_eq!(sina.calls(), 2);
    assert_eq!(envelope.meta.served_by(), ProviderId::Sina);
    assert_eq!(envelope.meta.errors.len(), 1);
}

// =============================================================================
// The synthetic floor
// =============================================================================

#[tokio::test]
async fn when_every_source_is_exhausted_a_full_synthetic_batch_is_served() {
    let set = symbols(&["600519", "000001", "300750"]);
    let sina = ScriptedAdapter::always(ProviderId::Sina, Err(FetchError::transport("down")));
    let tencent = ScriptedAdapter::always(ProviderId::Tencent, Err(FetchError::malformed("junk")));

    let coordinator =
        AcquisitionCoordinator::with_adapters(vec![sina, tencent], ChainConfig::default());

    let envelope = coordinator.acquire(&set).await.expect("acquire succeeds");

    assert_eq!(envelope.meta.served_by(), ProviderId::Synthetic);
    assert_eq!(
        envelope.meta.source_chain,
        vec![ProviderId::Sina, ProviderId::Tencent, ProviderId::Synthetic]
    );
    assert_eq!(envelope.payload.len(), 3);
    for quote in &envelope.payload {
        assert_eq!(quote.source, ProviderId::Synthetic);
        assert!(quote.clone().validated().is_ok());
    }
}

#[tokio::test]
async fn synthetic_batches_are_deterministic_per_symbol_set() {
    let set = symbols(&["600519", "000001"]);
    let config = ChainConfig::default();

    let first_envelope = AcquisitionCoordinator::with_adapters(Vec::new(), config.clone())
        .acquire(&set)
        .await
        .expect("acquire succeeds");
    let second_envelope = AcquisitionCoordinator::with_adapters(Vec::new(), config)
        .acquire(&set)
        .await
        .expect("acquire succeeds");

    for (a, b) in first_envelope
        .payload
        .iter()
        .zip(second_envelope.payload.iter())
    {
        assert_eq!(a.symbol, b.symbol);
        assert_eq!(a.last_price, b.last_price);
        assert_eq!(a.volume, b.volume);
        assert_eq!(a.valuation, b.valuation);
        assert_eq!(a.technicals, b.technicals);
    }
}

#[tokio::test]
async fn when_the_overall_deadline_expires_the_generator_answers() {
    let set = symbols(&["600519"]);
    let mut config = ChainConfig::default();
    config.deadline = Some(Duration::from_millis(50));

    let coordinator = AcquisitionCoordinator::with_adapters(
        vec![Arc::new(StallingAdapter {
            id: ProviderId::Sina,
        })],
        config,
    );

    let envelope = coordinator.acquire(&set).await.expect("acquire succeeds");

    assert_eq!(envelope.meta.served_by(), ProviderId::Synthetic);
    assert!(envelope
        .meta
        .errors
        .iter()
        .any(|error| error.code == "chain.deadline_exceeded"));
}

// =============================================================================
// Cache behavior
// =============================================================================

#[tokio::test]
async fn cached_batches_are_served_until_the_ttl_expires() {
    let set = symbols(&["600519", "000001"]);
    let sina = ScriptedAdapter::always(ProviderId::Sina, Ok(batch_from(ProviderId::Sina, &set)));

    let clock = Arc::new(ManualClock::new());
    let config = ChainConfig::default();
    let cache = QuoteCache::with_clock(config.quote_ttl, clock.clone());
    let coordinator = AcquisitionCoordinator::with_parts(vec![sina.clone()], cache, config);

    // First acquisition hits the provider and fills the cache.
    let first = coordinator.acquire(&set).await.expect("acquire succeeds");
    assert!(!first.meta.cache_hit);
    assert_eq!(sina.calls(), 1);

    // One second before the TTL the cache still answers.
    clock.set(Duration::from_secs(299));
    let second = coordinator.acquire(&set).await.expect("acquire succeeds");
    assert!(second.meta.cache_hit);
    assert_eq!(second.meta.source_chain, vec![ProviderId::Sina]);
    assert_eq!(sina.calls(), 1);

    // One second past the TTL the provider is consulted again.
    clock.set(Duration::from_secs(301));
    let third = coordinator.acquire(&set).await.expect("acquire succeeds");
    assert!(!third.meta.cache_hit);
    assert_eq!(sina.calls(), 2);
}

#[tokio::test]
async fn offline_batches_are_cached_like_real_ones() {
    let set = symbols(&["600036"]);

    let mut offline = ChainConfig::default();
    offline.use_real_data = false;
    let coordinator = AcquisitionCoordinator::with_adapters(Vec::new(), offline);

    let first = coordinator.acquire(&set).await.expect("acquire succeeds");
    assert_eq!(first.meta.served_by(), ProviderId::Synthetic);

    // Same coordinator, same set: second answer comes from the cache.
    let second = coordinator.acquire(&set).await.expect("acquire succeeds");
    assert!(second.meta.cache_hit);
}
