//! Engine configuration options.

use crate::types::AccountId;

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Ledger account that custodies pooled reserves.
    pub pool_account: AccountId,
    /// Maximum number of events to retain in memory.
    pub max_events: usize,
    /// Enable verbose logging.
    pub verbose: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pool_account: AccountId(0),
            max_events: 100_000,
            verbose: false,
        }
    }
}
