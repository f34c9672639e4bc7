// 6.0 snapshot.rs: cached portfolio valuation. refreshed only by an explicit
// update; reads between refreshes see the last stored state, not live
// reserves and prices.

use std::collections::HashMap;

use crate::types::{AssetId, Share, Timestamp, Value};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    /// Total portfolio value at the last refresh.
    pub total_value: Value,
    /// Per-asset share of total value at the last refresh.
    pub shares: HashMap<AssetId, Share>,
    /// When the last refresh ran. `None` until the first one.
    pub refreshed_at: Option<Timestamp>,
}

impl PortfolioSnapshot {
    pub fn empty() -> Self {
        Self {
            total_value: Value::zero(),
            shares: HashMap::new(),
            refreshed_at: None,
        }
    }

    /// Share recorded for `asset`, zero when the asset was not part of the
    /// last refresh.
    pub fn share(&self, asset: AssetId) -> Share {
        self.shares.get(&asset).copied().unwrap_or_else(Share::zero)
    }

    pub fn is_fresh(&self) -> bool {
        self.refreshed_at.is_some()
    }
}

impl Default for PortfolioSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}
