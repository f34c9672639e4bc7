//! Swap quote computation. Pure reads at the oracle mid rate; reserves are
//! not consulted and nothing here mutates state.

use super::core::Engine;
use super::results::EngineError;
use crate::math::{mul_div, Rounding};
use crate::transfer::TransferAgent;
use crate::types::{Amount, AssetId};

impl<L: TransferAgent> Engine<L> {
    /// Quote units received for selling `base_amount` of base into the pool.
    /// Rounds down.
    pub fn query_sell_base(
        &self,
        base: AssetId,
        quote: AssetId,
        base_amount: Amount,
    ) -> Result<Amount, EngineError> {
        self.quote_at_mid(base, quote, base_amount, Rounding::Down)
    }

    /// Quote units owed for buying `base_amount` of base out of the pool.
    /// Rounds up, so buy and sell quotes differ by at most one unit.
    pub fn query_buy_base(
        &self,
        base: AssetId,
        quote: AssetId,
        base_amount: Amount,
    ) -> Result<Amount, EngineError> {
        self.quote_at_mid(base, quote, base_amount, Rounding::Up)
    }

    // quote = base_amount * price[base] / price[quote]. the wad scales cancel.
    fn quote_at_mid(
        &self,
        base: AssetId,
        quote: AssetId,
        base_amount: Amount,
        rounding: Rounding,
    ) -> Result<Amount, EngineError> {
        if base == quote {
            return Err(EngineError::SameAsset(base));
        }
        if base_amount.is_zero() {
            return Err(EngineError::InvalidAmount);
        }

        let base_price = self.oracle_price(base)?;
        let quote_price = self.oracle_price(quote)?;

        let out = mul_div(
            base_amount.value(),
            base_price.value(),
            quote_price.value(),
            rounding,
        )
        .ok_or(EngineError::Overflow)?;

        Ok(Amount::new(out))
    }
}
