//! Per-provider timeout and retry policy for the acquisition chain.

use std::time::Duration;

use crate::cache::DEFAULT_QUOTE_TTL;
use crate::ProviderId;

/// Budget for one provider's slot in the chain. `retry_budget` counts
/// retries after the first attempt, so a budget of 2 allows 3 calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderPolicy {
    pub timeout: Duration,
    pub retry_budget: u32,
}

impl ProviderPolicy {
    pub const fn new(timeout: Duration, retry_budget: u32) -> Self {
        Self {
            timeout,
            retry_budget,
        }
    }

    pub const fn max_attempts(&self) -> u32 {
        self.retry_budget + 1
    }
}

impl Default for ProviderPolicy {
    fn default() -> Self {
        Self::new(Duration::from_secs(10), 1)
    }
}

/// Chain-wide acquisition configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainConfig {
    pub sina: ProviderPolicy,
    pub tencent: ProviderPolicy,
    pub eastmoney: ProviderPolicy,
    pub quote_ttl: Duration,
    /// Overall wall-clock budget for one walk of the real chain. `None`
    /// leaves only the per-provider timeouts in force.
    pub deadline: Option<Duration>,
    /// When false, real sources are skipped entirely and every request is
    /// served synthetically.
    pub use_real_data: bool,
}

impl ChainConfig {
    pub fn policy_for(&self, provider: ProviderId) -> ProviderPolicy {
        match provider {
            ProviderId::Sina => self.sina,
            ProviderId::Tencent => self.tencent,
            ProviderId::Eastmoney => self.eastmoney,
            ProviderId::Synthetic => ProviderPolicy::new(Duration::from_secs(1), 0),
        }
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            sina: ProviderPolicy::new(Duration::from_secs(10), 2),
            tencent: ProviderPolicy::new(Duration::from_secs(10), 1),
            eastmoney: ProviderPolicy::new(Duration::from_secs(10), 1),
            quote_ttl: DEFAULT_QUOTE_TTL,
            deadline: None,
            use_real_data: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_give_sina_the_largest_budget() {
        let config = ChainConfig::default();
        assert_eq!(config.sina.max_attempts(), 3);
        assert_eq!(config.tencent.max_attempts(), 2);
        assert_eq!(config.eastmoney.max_attempts(), 2);
        assert_eq!(config.quote_ttl, Duration::from_secs(300));
        assert!(config.use_real_data);
    }
}
