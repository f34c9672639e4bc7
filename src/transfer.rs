// 4.0 transfer.rs: MOCKED. the seam between the engine and whatever system
// actually moves assets. the in-memory ledger is plain balance maps, no real
// token transfers.

use std::collections::HashMap;

use crate::types::{AccountId, Amount, AssetId};

// Errors from transfer operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransferError {
    #[error("account {account:?} holds {available} of asset {asset:?}, requested {requested}")]
    InsufficientBalance {
        asset: AssetId,
        account: AccountId,
        available: Amount,
        requested: Amount,
    },

    #[error("holder {holder:?} approved {approved} of asset {asset:?}, requested {requested}")]
    InsufficientAllowance {
        asset: AssetId,
        holder: AccountId,
        approved: Amount,
        requested: Amount,
    },
}

/// Transfer seam the engine settles through. Implement this against a real
/// custody or settlement system; a failed call aborts the engine operation
/// that made it.
pub trait TransferAgent {
    /// Pull `amount` of `asset` from `holder` to `recipient`, spending the
    /// holder's allowance toward pool custody.
    fn transfer_from(
        &mut self,
        asset: AssetId,
        holder: AccountId,
        recipient: AccountId,
        amount: Amount,
    ) -> Result<(), TransferError>;

    /// Pay `amount` of `asset` out of pool custody to `recipient`.
    fn transfer(
        &mut self,
        asset: AssetId,
        recipient: AccountId,
        amount: Amount,
    ) -> Result<(), TransferError>;
}

// 4.1: in-memory ledger with per (asset, account) balances and allowances
// toward the custody account. mint and approve exist for tests and simulation.
#[derive(Debug, Clone)]
pub struct InMemoryLedger {
    custody: AccountId,
    balances: HashMap<(AssetId, AccountId), u128>,
    allowances: HashMap<(AssetId, AccountId), u128>,
}

impl InMemoryLedger {
    pub fn new(custody: AccountId) -> Self {
        Self {
            custody,
            balances: HashMap::new(),
            allowances: HashMap::new(),
        }
    }

    pub fn custody(&self) -> AccountId {
        self.custody
    }

    /// Credit `account` with freshly created units.
    pub fn mint(&mut self, asset: AssetId, account: AccountId, amount: Amount) {
        let balance = self.balances.entry((asset, account)).or_insert(0);
        *balance = balance.saturating_add(amount.value());
    }

    /// Set the holder's allowance toward pool custody. Overwrites, not adds.
    pub fn approve(&mut self, asset: AssetId, holder: AccountId, amount: Amount) {
        self.allowances.insert((asset, holder), amount.value());
    }

    pub fn balance_of(&self, asset: AssetId, account: AccountId) -> Amount {
        Amount::new(self.balances.get(&(asset, account)).copied().unwrap_or(0))
    }

    pub fn allowance(&self, asset: AssetId, holder: AccountId) -> Amount {
        Amount::new(self.allowances.get(&(asset, holder)).copied().unwrap_or(0))
    }

    /// Sum of every account's balance in `asset`.
    pub fn total_supply(&self, asset: AssetId) -> Amount {
        let total = self
            .balances
            .iter()
            .filter(|(key, _)| key.0 == asset)
            .fold(0u128, |acc, (_, units)| acc.saturating_add(*units));
        Amount::new(total)
    }
}

impl TransferAgent for InMemoryLedger {
    fn transfer_from(
        &mut self,
        asset: AssetId,
        holder: AccountId,
        recipient: AccountId,
        amount: Amount,
    ) -> Result<(), TransferError> {
        let approved = self.allowance(asset, holder);
        if approved < amount {
            return Err(TransferError::InsufficientAllowance {
                asset,
                holder,
                approved,
                requested: amount,
            });
        }

        let available = self.balance_of(asset, holder);
        if available < amount {
            return Err(TransferError::InsufficientBalance {
                asset,
                account: holder,
                available,
                requested: amount,
            });
        }

        *self.allowances.entry((asset, holder)).or_insert(0) -= amount.value();
        *self.balances.entry((asset, holder)).or_insert(0) -= amount.value();
        *self.balances.entry((asset, recipient)).or_insert(0) += amount.value();
        Ok(())
    }

    fn transfer(
        &mut self,
        asset: AssetId,
        recipient: AccountId,
        amount: Amount,
    ) -> Result<(), TransferError> {
        let available = self.balance_of(asset, self.custody);
        if available < amount {
            return Err(TransferError::InsufficientBalance {
                asset,
                account: self.custody,
                available,
                requested: amount,
            });
        }

        *self.balances.entry((asset, self.custody)).or_insert(0) -= amount.value();
        *self.balances.entry((asset, recipient)).or_insert(0) += amount.value();
        Ok(())
    }
}
