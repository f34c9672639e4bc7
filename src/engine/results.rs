// 8.0.2: result types and errors for engine operations.

use crate::transfer::TransferError;
use crate::types::{AccountId, Amount, AssetId, Share, TradeSide, Value};

#[derive(Debug, Clone)]
pub struct TradeResult {
    pub trader: AccountId,
    pub base: AssetId,
    pub quote: AssetId,
    pub side: TradeSide,
    pub base_amount: Amount,
    pub quote_amount: Amount,
}

#[derive(Debug, Clone)]
pub struct ValuationResult {
    pub total_value: Value,
    pub asset_count: usize,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum EngineError {
    #[error("Asset {0:?} is not bound")]
    NotBound(AssetId),

    #[error("Asset {0:?} is already bound")]
    AlreadyBound(AssetId),

    #[error("Invalid share bounds: min {min}, max {max}")]
    InvalidBounds { min: Share, max: Share },

    #[error("Invalid oracle price for asset {0:?}")]
    InvalidPrice(AssetId),

    #[error("No oracle price set for asset {0:?}")]
    PriceNotSet(AssetId),

    #[error("Amount must be positive")]
    InvalidAmount,

    #[error("Base and quote are the same asset {0:?}")]
    SameAsset(AssetId),

    #[error("Slippage limit exceeded: quoted {quoted}, limit {limit}")]
    SlippageExceeded { quoted: Amount, limit: Amount },

    #[error("Share of asset {asset:?} would rise to {share}, above max {max}")]
    ShareAboveMax {
        asset: AssetId,
        share: Share,
        max: Share,
    },

    #[error("Share of asset {asset:?} would fall to {share}, below min {min}")]
    ShareBelowMin {
        asset: AssetId,
        share: Share,
        min: Share,
    },

    #[error("Insufficient reserve of asset {asset:?}: requested {requested}, available {available}")]
    InsufficientReserve {
        asset: AssetId,
        requested: Amount,
        available: Amount,
    },

    #[error("Portfolio is empty or has zero value")]
    EmptyPortfolio,

    #[error("No oracle price for bound asset {0:?}")]
    NoPriceForBoundAsset(AssetId),

    #[error("Arithmetic overflow")]
    Overflow,

    #[error("Transfer failed: {0}")]
    TransferFailed(#[from] TransferError),
}
