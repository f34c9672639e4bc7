//! Registry lifecycle: binding and unbinding pooled assets.

use super::core::Engine;
use super::results::EngineError;
use crate::binding::{AssetBinding, ShareBand};
use crate::events::{AssetBoundEvent, AssetUnboundEvent, EventPayload};
use crate::transfer::TransferAgent;
use crate::types::{AccountId, Amount, AssetId, Share};

impl<L: TransferAgent> Engine<L> {
    /// Register `asset` with an initial reserve pulled from `operator` and a
    /// share band for its slice of portfolio value. Bounds cannot change
    /// after binding; unbind and bind again to adjust them.
    pub fn bind(
        &mut self,
        operator: AccountId,
        asset: AssetId,
        initial_reserve: Amount,
        min_share: Share,
        max_share: Share,
    ) -> Result<(), EngineError> {
        let band = ShareBand::new(min_share, max_share).ok_or(EngineError::InvalidBounds {
            min: min_share,
            max: max_share,
        })?;
        self.bind_with_band(operator, asset, initial_reserve, band)
    }

    /// Register `asset` without composition limits.
    pub fn bind_unconstrained(
        &mut self,
        operator: AccountId,
        asset: AssetId,
        initial_reserve: Amount,
    ) -> Result<(), EngineError> {
        self.bind_with_band(operator, asset, initial_reserve, ShareBand::unconstrained())
    }

    fn bind_with_band(
        &mut self,
        operator: AccountId,
        asset: AssetId,
        initial_reserve: Amount,
        band: ShareBand,
    ) -> Result<(), EngineError> {
        if self.bindings.contains_key(&asset) {
            return Err(EngineError::AlreadyBound(asset));
        }

        // pull the seed reserve before touching the registry
        self.ledger
            .transfer_from(asset, operator, self.config.pool_account, initial_reserve)?;

        let binding = AssetBinding::new(initial_reserve, band, self.current_time);
        self.bindings.insert(asset, binding);

        self.emit_event(EventPayload::AssetBound(AssetBoundEvent {
            asset,
            initial_reserve,
            min_share: band.min(),
            max_share: band.max(),
        }));

        Ok(())
    }

    /// Remove `asset` from the pool, paying its full reserve out to
    /// `operator`. The stored oracle price and the asset's cached snapshot
    /// entry go with it, so a later rebind starts from share zero.
    pub fn unbind(&mut self, operator: AccountId, asset: AssetId) -> Result<Amount, EngineError> {
        let reserve = self.binding(asset)?.reserve;

        self.ledger.transfer(asset, operator, reserve)?;

        self.bindings.remove(&asset);
        self.prices.remove(&asset);
        self.snapshot.shares.remove(&asset);

        self.emit_event(EventPayload::AssetUnbound(AssetUnboundEvent {
            asset,
            returned_reserve: reserve,
            recipient: operator,
        }));

        Ok(reserve)
    }

    /// Unbind every asset, returning each reserve to `operator`. Teardown
    /// helper for winding a pool down; the empty engine is the initial state.
    pub fn drain(&mut self, operator: AccountId) -> Result<Vec<(AssetId, Amount)>, EngineError> {
        let mut assets: Vec<AssetId> = self.bindings.keys().copied().collect();
        assets.sort_by_key(|asset| asset.0);

        let mut drained = Vec::with_capacity(assets.len());
        for asset in assets {
            let reserve = self.unbind(operator, asset)?;
            drained.push((asset, reserve));
        }
        Ok(drained)
    }
}
