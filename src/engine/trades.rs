//! Trade execution. Quotes at the oracle mid rate, stages reserve deltas,
//! checks share-band admission on the staged composition, then settles the
//! external legs and commits. Nothing partial is ever observable.

use super::core::Engine;
use super::results::{EngineError, TradeResult};
use crate::events::{EventPayload, TradeExecutedEvent, TradeRejectedEvent};
use crate::transfer::TransferAgent;
use crate::types::{AccountId, Amount, AssetId, TradeSide};

impl<L: TransferAgent> Engine<L> {
    /// Sell `base_amount_in` of base to the pool for quote. Rejects when the
    /// proceeds fall short of `min_quote_out` or the staged composition
    /// leaves either asset's share band.
    pub fn sell_base(
        &mut self,
        trader: AccountId,
        base: AssetId,
        quote: AssetId,
        base_amount_in: Amount,
        min_quote_out: Amount,
    ) -> Result<TradeResult, EngineError> {
        match self.try_sell_base(trader, base, quote, base_amount_in, min_quote_out) {
            Ok(result) => Ok(result),
            Err(error) => {
                // emit rejection event for audit
                self.emit_event(EventPayload::TradeRejected(TradeRejectedEvent {
                    trader,
                    base,
                    quote,
                    side: TradeSide::SellBase,
                    reason: error.to_string(),
                }));
                Err(error)
            }
        }
    }

    /// Buy `base_amount_out` of base out of the pool for quote. Rejects when
    /// the cost exceeds `max_quote_in` or the staged composition leaves
    /// either asset's share band.
    pub fn buy_base(
        &mut self,
        trader: AccountId,
        base: AssetId,
        quote: AssetId,
        base_amount_out: Amount,
        max_quote_in: Amount,
    ) -> Result<TradeResult, EngineError> {
        match self.try_buy_base(trader, base, quote, base_amount_out, max_quote_in) {
            Ok(result) => Ok(result),
            Err(error) => {
                self.emit_event(EventPayload::TradeRejected(TradeRejectedEvent {
                    trader,
                    base,
                    quote,
                    side: TradeSide::BuyBase,
                    reason: error.to_string(),
                }));
                Err(error)
            }
        }
    }

    fn try_sell_base(
        &mut self,
        trader: AccountId,
        base: AssetId,
        quote: AssetId,
        base_amount_in: Amount,
        min_quote_out: Amount,
    ) -> Result<TradeResult, EngineError> {
        let quote_out = self.query_sell_base(base, quote, base_amount_in)?;
        if quote_out < min_quote_out {
            return Err(EngineError::SlippageExceeded {
                quoted: quote_out,
                limit: min_quote_out,
            });
        }

        // gain side first: the base share cap is checked against the pool as
        // it stands mid-trade, quote reserve still untouched
        let staged_base = self
            .binding(base)?
            .reserve
            .checked_add(base_amount_in)
            .ok_or(EngineError::Overflow)?;
        self.check_gain(&[(base, staged_base)], base)?;

        let quote_reserve = self.binding(quote)?.reserve;
        let staged_quote =
            quote_reserve
                .checked_sub(quote_out)
                .ok_or(EngineError::InsufficientReserve {
                    asset: quote,
                    requested: quote_out,
                    available: quote_reserve,
                })?;
        self.check_loss(&[(base, staged_base), (quote, staged_quote)], quote)?;

        // external legs: pull the base in, pay the quote out. a failed
        // payout refunds the pull before surfacing.
        self.ledger
            .transfer_from(base, trader, self.config.pool_account, base_amount_in)?;
        if let Err(push_error) = self.ledger.transfer(quote, trader, quote_out) {
            self.ledger.transfer(base, trader, base_amount_in)?;
            return Err(EngineError::TransferFailed(push_error));
        }

        self.set_reserve(base, staged_base);
        self.set_reserve(quote, staged_quote);

        self.emit_event(EventPayload::TradeExecuted(TradeExecutedEvent {
            trader,
            base,
            quote,
            side: TradeSide::SellBase,
            base_amount: base_amount_in,
            quote_amount: quote_out,
        }));

        Ok(TradeResult {
            trader,
            base,
            quote,
            side: TradeSide::SellBase,
            base_amount: base_amount_in,
            quote_amount: quote_out,
        })
    }

    fn try_buy_base(
        &mut self,
        trader: AccountId,
        base: AssetId,
        quote: AssetId,
        base_amount_out: Amount,
        max_quote_in: Amount,
    ) -> Result<TradeResult, EngineError> {
        let quote_in = self.query_buy_base(base, quote, base_amount_out)?;
        if quote_in > max_quote_in {
            return Err(EngineError::SlippageExceeded {
                quoted: quote_in,
                limit: max_quote_in,
            });
        }

        let staged_quote = self
            .binding(quote)?
            .reserve
            .checked_add(quote_in)
            .ok_or(EngineError::Overflow)?;
        self.check_gain(&[(quote, staged_quote)], quote)?;

        let base_reserve = self.binding(base)?.reserve;
        let staged_base =
            base_reserve
                .checked_sub(base_amount_out)
                .ok_or(EngineError::InsufficientReserve {
                    asset: base,
                    requested: base_amount_out,
                    available: base_reserve,
                })?;
        self.check_loss(&[(base, staged_base), (quote, staged_quote)], base)?;

        self.ledger
            .transfer_from(quote, trader, self.config.pool_account, quote_in)?;
        if let Err(push_error) = self.ledger.transfer(base, trader, base_amount_out) {
            self.ledger.transfer(quote, trader, quote_in)?;
            return Err(EngineError::TransferFailed(push_error));
        }

        self.set_reserve(base, staged_base);
        self.set_reserve(quote, staged_quote);

        self.emit_event(EventPayload::TradeExecuted(TradeExecutedEvent {
            trader,
            base,
            quote,
            side: TradeSide::BuyBase,
            base_amount: base_amount_out,
            quote_amount: quote_in,
        }));

        Ok(TradeResult {
            trader,
            base,
            quote,
            side: TradeSide::BuyBase,
            base_amount: base_amount_out,
            quote_amount: quote_in,
        })
    }

    // the asset the pool gains must not rise above its max share
    fn check_gain(
        &self,
        staged: &[(AssetId, Amount)],
        asset: AssetId,
    ) -> Result<(), EngineError> {
        let valuation = self.value_portfolio(staged)?;
        let share = valuation.share_of(asset).ok_or(EngineError::Overflow)?;
        let max = self.binding(asset)?.band.max();
        if share > max {
            return Err(EngineError::ShareAboveMax { asset, share, max });
        }
        Ok(())
    }

    // the asset the pool pays out must not fall below its min share
    fn check_loss(
        &self,
        staged: &[(AssetId, Amount)],
        asset: AssetId,
    ) -> Result<(), EngineError> {
        let valuation = self.value_portfolio(staged)?;
        let share = valuation.share_of(asset).ok_or(EngineError::Overflow)?;
        let min = self.binding(asset)?.band.min();
        if share < min {
            return Err(EngineError::ShareBelowMin { asset, share, min });
        }
        Ok(())
    }
}
