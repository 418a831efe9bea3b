//! Ordered fallback acquisition over the provider chain.
//!
//! One coordinator owns the adapter chain, the TTL cache, and the synthetic
//! generator. Acquisition never fails for lack of data: when the cache
//! misses and every real source is exhausted, the generator answers. The
//! returned envelope records every source consulted and every failed
//! attempt, so "real or synthesized" is always visible to the caller.

use std::sync::Arc;
use std::time::Instant;

use crate::adapters::{
    EastmoneyAdapter, FetchError, ProviderAdapter, QuoteRequest, SinaAdapter, TencentAdapter,
    TimeRange,
};
use crate::cache::{CacheKey, QuoteCache};
use crate::envelope::{new_request_id, Envelope, EnvelopeError, EnvelopeMeta};
use crate::http_client::ReqwestHttpClient;
use crate::policy::ChainConfig;
use crate::synthetic::SyntheticGenerator;
use crate::{CoreError, ProviderId, StockQuote, Symbol, UtcDateTime, ValidationError};

pub struct AcquisitionCoordinator {
    adapters: Vec<Arc<dyn ProviderAdapter>>,
    generator: SyntheticGenerator,
    cache: QuoteCache,
    config: ChainConfig,
}

impl AcquisitionCoordinator {
    /// Chain backed by the live HTTP providers in default priority order.
    pub fn live(config: ChainConfig) -> Self {
        let http = Arc::new(ReqwestHttpClient::new());
        let adapters: Vec<Arc<dyn ProviderAdapter>> = vec![
            Arc::new(SinaAdapter::with_http_client(http.clone())),
            Arc::new(TencentAdapter::with_http_client(http.clone())),
            Arc::new(EastmoneyAdapter::with_http_client(http)),
        ];
        Self::with_adapters(adapters, config)
    }

    pub fn with_adapters(adapters: Vec<Arc<dyn ProviderAdapter>>, config: ChainConfig) -> Self {
        let cache = QuoteCache::new(config.quote_ttl);
        Self::with_parts(adapters, cache, config)
    }

    /// Full injection point, used by tests to control the cache clock.
    pub fn with_parts(
        adapters: Vec<Arc<dyn ProviderAdapter>>,
        cache: QuoteCache,
        config: ChainConfig,
    ) -> Self {
        Self {
            adapters,
            generator: SyntheticGenerator::new(),
            cache,
            config,
        }
    }

    pub const fn config(&self) -> &ChainConfig {
        &self.config
    }

    pub const fn cache(&self) -> &QuoteCache {
        &self.cache
    }

    /// Acquire a quote batch for the symbol set.
    ///
    /// # Errors
    ///
    /// Only request validation can fail; exhausted sources fall through to
    /// synthesis instead of erroring.
    pub async fn acquire(
        &self,
        symbols: &[Symbol],
    ) -> Result<Envelope<Vec<StockQuote>>, CoreError> {
        if symbols.is_empty() {
            return Err(ValidationError::EmptySymbol.into());
        }

        let request_id = new_request_id();
        let started = Instant::now();
        let key = CacheKey::for_symbols(symbols, self.config.use_real_data);

        if let Some(hit) = self.cache.get(&key).await {
            tracing::debug!(request_id = %request_id, source = %hit.source, "cache hit");
            let meta = EnvelopeMeta::new(
                request_id,
                vec![hit.source],
                elapsed_ms(started),
                true,
                Vec::new(),
            )?;
            return Ok(Envelope::new(meta, hit.quotes));
        }

        let mut chain: Vec<ProviderId> = Vec::new();
        let mut errors: Vec<EnvelopeError> = Vec::new();

        if self.config.use_real_data {
            let walked = match self.config.deadline {
                Some(deadline) => {
                    let walk = self.walk_chain(symbols, &mut chain, &mut errors);
                    let outcome = tokio::time::timeout(deadline, walk).await;
                    match outcome {
                        Ok(result) => result,
                        Err(_) => {
                            errors.push(deadline_error(deadline));
                            None
                        }
                    }
                }
                None => self.walk_chain(symbols, &mut chain, &mut errors).await,
            };

            if let Some(quotes) = walked {
                let source = *chain.last().unwrap_or(&ProviderId::Synthetic);
                self.cache.put(key, quotes.clone(), source).await;
                let meta =
                    EnvelopeMeta::new(request_id, chain, elapsed_ms(started), false, errors)?;
                return Ok(Envelope::new(meta, quotes));
            }
            tracing::warn!(request_id = %request_id, "all real sources exhausted, synthesizing");
        } else {
            tracing::debug!(request_id = %request_id, "offline mode, synthesizing");
        }

        let quotes = self.generator.generate_batch(symbols);
        chain.push(ProviderId::Synthetic);
        self.cache
            .put(key, quotes.clone(), ProviderId::Synthetic)
            .await;

        let meta = EnvelopeMeta::new(request_id, chain, elapsed_ms(started), false, errors)?;
        Ok(Envelope::new(meta, quotes))
    }

    /// Walk the real providers in order. Returns the first non-empty batch,
    /// or `None` when the chain is exhausted.
    async fn walk_chain(
        &self,
        symbols: &[Symbol],
        chain: &mut Vec<ProviderId>,
        errors: &mut Vec<EnvelopeError>,
    ) -> Option<Vec<StockQuote>> {
        // The same request is replayed on every attempt against every
        // adapter; only the fetch outcome varies.
        let request = match QuoteRequest::new(symbols.to_vec(), TimeRange::at(UtcDateTime::now()))
        {
            Ok(request) => request,
            Err(error) => {
                errors.push(EnvelopeError {
                    code: error.code().to_owned(),
                    message: error.message().to_owned(),
                    retryable: false,
                    source: None,
                });
                return None;
            }
        };

        for adapter in &self.adapters {
            let provider = adapter.id();
            let policy = self.config.policy_for(provider);
            chain.push(provider);

            for attempt in 1..=policy.max_attempts() {
                let outcome =
                    tokio::time::timeout(policy.timeout, adapter.fetch(request.clone())).await;
                let error = match outcome {
                    Ok(Ok(quotes)) if !quotes.is_empty() => return Some(quotes),
                    Ok(Ok(_)) => {
                        // An empty batch is not an answer; do not commit the
                        // chain to this source.
                        errors.push(empty_result_error(provider));
                        break;
                    }
                    Ok(Err(error)) => error,
                    Err(_) => FetchError::transport(format!(
                        "{provider} exceeded the {}ms deadline",
                        policy.timeout.as_millis()
                    )),
                };

                tracing::warn!(
                    source = %provider,
                    attempt,
                    kind = error.code(),
                    "provider attempt failed: {}",
                    error.message()
                );
                let retry = error.retryable() && attempt < policy.max_attempts();
                errors.push(attempt_error(provider, &error));
                if !retry {
                    break;
                }
            }
        }

        None
    }
}

fn attempt_error(provider: ProviderId, error: &FetchError) -> EnvelopeError {
    EnvelopeError {
        code: error.code().to_owned(),
        message: error.message().to_owned(),
        retryable: error.retryable(),
        source: Some(provider),
    }
}

fn deadline_error(deadline: std::time::Duration) -> EnvelopeError {
    EnvelopeError {
        code: String::from("chain.deadline_exceeded"),
        message: format!(
            "acquisition exceeded the {}ms overall deadline",
            deadline.as_millis()
        ),
        retryable: false,
        source: None,
    }
}

fn empty_result_error(provider: ProviderId) -> EnvelopeError {
    EnvelopeError {
        code: String::from("fetch.empty_result"),
        message: format!("{provider} returned no usable records"),
        retryable: false,
        source: Some(provider),
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
