//! Oracle price storage. One wad price per bound asset, last write wins.

use super::core::Engine;
use super::results::EngineError;
use crate::events::{EventPayload, OraclePriceSetEvent};
use crate::feed::PriceSource;
use crate::math::wad_from_decimal;
use crate::transfer::TransferAgent;
use crate::types::{AssetId, Price};

impl<L: TransferAgent> Engine<L> {
    /// Store the oracle price for a bound asset. No staleness or
    /// authentication logic at this layer.
    pub fn set_oracle_price(&mut self, asset: AssetId, price: Price) -> Result<(), EngineError> {
        if !self.bindings.contains_key(&asset) {
            return Err(EngineError::NotBound(asset));
        }

        self.prices.insert(asset, price);

        self.emit_event(EventPayload::OraclePriceSet(OraclePriceSetEvent {
            asset,
            price,
        }));

        Ok(())
    }

    pub fn oracle_price(&self, asset: AssetId) -> Result<Price, EngineError> {
        if !self.bindings.contains_key(&asset) {
            return Err(EngineError::NotBound(asset));
        }
        self.prices
            .get(&asset)
            .copied()
            .ok_or(EngineError::PriceNotSet(asset))
    }

    /// Normalize and store every quote `source` currently exposes. Quotes
    /// for unbound assets are skipped; a zero, negative, or unrepresentable
    /// quote aborts with `InvalidPrice` before any price is stored.
    /// Returns how many prices were set.
    pub fn ingest_price_source<S: PriceSource>(&mut self, source: &S) -> Result<usize, EngineError> {
        // validate the whole batch first so a bad quote leaves no prices behind
        let mut validated = Vec::new();
        for quote in source.quotes() {
            if !self.bindings.contains_key(&quote.asset) {
                continue;
            }

            let wad = wad_from_decimal(quote.price).ok_or(EngineError::InvalidPrice(quote.asset))?;
            let price = Price::new(wad).ok_or(EngineError::InvalidPrice(quote.asset))?;
            validated.push((quote.asset, price));
        }

        for &(asset, price) in &validated {
            self.set_oracle_price(asset, price)?;
        }
        Ok(validated.len())
    }
}
