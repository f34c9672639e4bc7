// basket-core: multi-asset pooled valuation and trading engine.
// value-first architecture: oracle pricing and share accounting take priority.
// all computation is deterministic with no external I/O.
//
// file map (search X.0 for structs, X.1+ for logic):
//   1.x  types.rs: primitives: AssetId, AccountId, Amount, Price, Share, Value
//   2.x  math.rs: wad fixed point, 256-bit widening, rounding direction
//   3.x  binding.rs: share bands and per-asset bindings
//   4.x  transfer.rs: transfer seam to the asset ledger (mocked)
//   5.x  feed.rs: decimal price quotes normalized to wads (mocked)
//   6.x  snapshot.rs: cached portfolio valuation
//   7.x  events.rs: state transition events for audit
//   8.x  engine/: core engine: binding, oracle prices, quotes, valuation, trades

// core modules
pub mod binding;
pub mod engine;
pub mod events;
pub mod math;
pub mod snapshot;
pub mod types;

// integration modules
pub mod feed;
pub mod transfer;

// re exports for convenience
pub use binding::*;
pub use engine::*;
pub use events::*;
pub use math::*;
pub use snapshot::*;
pub use types::*;
pub use feed::{PriceQuote, PriceSource, StaticPriceSource};
pub use transfer::{InMemoryLedger, TransferAgent, TransferError};
