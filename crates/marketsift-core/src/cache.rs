//! In-process TTL cache for acquired quote batches.
//!
//! Keys fingerprint the requested symbol set plus whether real sources were
//! allowed, so a synthetic-only batch never masquerades as a real one.
//! Expiry is lazy; a stale entry is dropped on the read that discovers it.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::clock::{Clock, SystemClock};
use crate::{ProviderId, StockQuote, Symbol};

pub const DEFAULT_QUOTE_TTL: Duration = Duration::from_secs(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    fingerprint: u64,
    count: usize,
    real: bool,
}

impl CacheKey {
    /// Key for a symbol set. Order-insensitive: the set is fingerprinted in
    /// sorted canonical form.
    pub fn for_symbols(symbols: &[Symbol], real: bool) -> Self {
        let mut canonical: Vec<String> = symbols.iter().map(Symbol::canonical).collect();
        canonical.sort_unstable();
        canonical.dedup();

        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        for rendered in &canonical {
            for byte in rendered.as_bytes() {
                hash ^= u64::from(*byte);
                hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
            }
            hash ^= u64::from(b'\n');
            hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
        }

        Self {
            fingerprint: hash,
            count: canonical.len(),
            real,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CachedBatch {
    pub quotes: Vec<StockQuote>,
    pub source: ProviderId,
    created_at: Duration,
}

pub struct QuoteCache {
    inner: RwLock<HashMap<CacheKey, CachedBatch>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl QuoteCache {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock::new()))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Fresh batch for the key, if any. Entries at or past the TTL count as
    /// absent and are evicted.
    pub async fn get(&self, key: &CacheKey) -> Option<CachedBatch> {
        let now = self.clock.now();

        {
            let inner = self.inner.read().await;
            match inner.get(key) {
                Some(entry) if now.saturating_sub(entry.created_at) < self.ttl => {
                    return Some(entry.clone());
                }
                Some(_) => {}
                None => return None,
            }
        }

        let mut inner = self.inner.write().await;
        if let Some(entry) = inner.get(key) {
            if now.saturating_sub(entry.created_at) < self.ttl {
                return Some(entry.clone());
            }
            inner.remove(key);
        }
        None
    }

    pub async fn put(&self, key: CacheKey, quotes: Vec<StockQuote>, source: ProviderId) {
        let entry = CachedBatch {
            quotes,
            source,
            created_at: self.clock.now(),
        };
        let mut inner = self.inner.write().await;
        inner.insert(key, entry);
    }

    pub async fn clear(&self) {
        let mut inner = self.inner.write().await;
        inner.clear();
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}
