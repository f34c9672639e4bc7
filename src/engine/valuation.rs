//! Portfolio valuation. The explicit snapshot refresh lives here, along with
//! the live-state valuation helper that trade admission reuses.

use std::collections::HashMap;

use super::core::Engine;
use super::results::{EngineError, ValuationResult};
use crate::events::{EventPayload, PortfolioRefreshedEvent};
use crate::math::{mul_div, Rounding, WAD};
use crate::snapshot::PortfolioSnapshot;
use crate::transfer::TransferAgent;
use crate::types::{Amount, AssetId, Share, Value};

/// Live portfolio valuation: per-asset values and their total.
pub(super) struct PortfolioValuation {
    values: Vec<(AssetId, Value)>,
    total: Value,
}

impl PortfolioValuation {
    pub(super) fn total(&self) -> Value {
        self.total
    }

    pub(super) fn values(&self) -> &[(AssetId, Value)] {
        &self.values
    }

    /// Share of total value held by `asset`, rounded down.
    pub(super) fn share_of(&self, asset: AssetId) -> Option<Share> {
        let value = self
            .values
            .iter()
            .find(|(entry, _)| *entry == asset)
            .map(|(_, value)| *value)?;
        mul_div(value.value(), WAD, self.total.value(), Rounding::Down).map(Share::new)
    }
}

impl<L: TransferAgent> Engine<L> {
    /// Recompute total portfolio value and per-asset shares from live
    /// reserves and prices, and store the result. This is the only refresh
    /// point for the snapshot; every other read sees the stored state.
    pub fn update_portfolio_value(&mut self) -> Result<ValuationResult, EngineError> {
        let valuation = self.value_portfolio(&[])?;

        let mut shares = HashMap::with_capacity(valuation.values().len());
        for (asset, value) in valuation.values() {
            let share = mul_div(value.value(), WAD, valuation.total().value(), Rounding::Down)
                .ok_or(EngineError::Overflow)?;
            shares.insert(*asset, Share::new(share));
        }

        let asset_count = shares.len();
        let total_value = valuation.total();

        self.snapshot = PortfolioSnapshot {
            total_value,
            shares,
            refreshed_at: Some(self.current_time),
        };

        self.emit_event(EventPayload::PortfolioRefreshed(PortfolioRefreshedEvent {
            total_value,
            asset_count,
        }));

        Ok(ValuationResult {
            total_value,
            asset_count,
        })
    }

    /// Share of total value held in `asset` as of the last refresh. Never
    /// recomputes: an asset bound after the last refresh reads zero until
    /// the next one.
    pub fn current_share(&self, asset: AssetId) -> Result<Share, EngineError> {
        if !self.bindings.contains_key(&asset) {
            return Err(EngineError::NotBound(asset));
        }
        Ok(self.snapshot.share(asset))
    }

    /// Value every bound asset at live prices, with `staged` reserve
    /// overrides taking precedence over stored reserves. Fails if any bound
    /// asset lacks a price, or if nothing of value is bound.
    pub(super) fn value_portfolio(
        &self,
        staged: &[(AssetId, Amount)],
    ) -> Result<PortfolioValuation, EngineError> {
        if self.bindings.is_empty() {
            return Err(EngineError::EmptyPortfolio);
        }

        let mut values = Vec::with_capacity(self.bindings.len());
        let mut total: u128 = 0;

        for (asset, binding) in &self.bindings {
            let price = self
                .prices
                .get(asset)
                .copied()
                .ok_or(EngineError::NoPriceForBoundAsset(*asset))?;

            let reserve = staged
                .iter()
                .find(|(staged_asset, _)| staged_asset == asset)
                .map(|(_, reserve)| *reserve)
                .unwrap_or(binding.reserve);

            let value = mul_div(reserve.value(), price.value(), WAD, Rounding::Down)
                .ok_or(EngineError::Overflow)?;
            total = total.checked_add(value).ok_or(EngineError::Overflow)?;
            values.push((*asset, Value::new(value)));
        }

        if total == 0 {
            return Err(EngineError::EmptyPortfolio);
        }

        Ok(PortfolioValuation {
            values,
            total: Value::new(total),
        })
    }
}
