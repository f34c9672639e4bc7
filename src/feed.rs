// 5.0 feed.rs: MOCKED. price feed boundary. the engine is agnostic to where
// quotes come from; a source hands over decimal prices and the engine
// normalizes them to wads on ingestion. one price per asset, last write wins.
// no aggregation, staleness tracking, or multi-source consensus at this layer.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::AssetId;

/// A single decimal price quote from an external source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub asset: AssetId,
    pub price: Decimal,
}

impl PriceQuote {
    pub fn new(asset: AssetId, price: Decimal) -> Self {
        Self { asset, price }
    }
}

/// Trait for price sources. Implement this to integrate an oracle network
/// or data vendor.
pub trait PriceSource {
    /// Current quotes, one per asset the source covers.
    fn quotes(&self) -> Vec<PriceQuote>;
}

/// Fixed in-memory source for tests and simulation.
#[derive(Debug, Clone, Default)]
pub struct StaticPriceSource {
    quotes: Vec<PriceQuote>,
}

impl StaticPriceSource {
    pub fn new() -> Self {
        Self { quotes: Vec::new() }
    }

    /// Set or overwrite the quote for `asset`.
    pub fn set(&mut self, asset: AssetId, price: Decimal) {
        if let Some(quote) = self.quotes.iter_mut().find(|q| q.asset == asset) {
            quote.price = price;
        } else {
            self.quotes.push(PriceQuote::new(asset, price));
        }
    }
}

impl PriceSource for StaticPriceSource {
    fn quotes(&self) -> Vec<PriceQuote> {
        self.quotes.clone()
    }
}
