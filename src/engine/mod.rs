// 8.0: core pooled-value engine. coordinates asset binding, oracle prices,
// swap quotes, portfolio valuation, and admission-checked trade execution.
// deterministic and event-driven with no external I/O.

mod admin;
mod config;
mod core;
mod oracle;
mod quotes;
mod results;
mod trades;
mod valuation;

pub use config::EngineConfig;
pub use core::Engine;
pub use results::{EngineError, TradeResult, ValuationResult};
