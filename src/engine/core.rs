// 8.0 engine/core.rs: main engine. holds the asset registry, oracle prices,
// the cached portfolio snapshot, and the transfer ledger it settles through.

use super::config::EngineConfig;
use super::results::EngineError;
use crate::binding::AssetBinding;
use crate::events::{Event, EventId, EventPayload};
use crate::snapshot::PortfolioSnapshot;
use crate::transfer::TransferAgent;
use crate::types::{Amount, AssetId, Price, Share, Timestamp};
use std::collections::HashMap;

/** 8.1: main engine struct. all state lives here */
#[derive(Debug)]
pub struct Engine<L: TransferAgent> {
    pub(super) config: EngineConfig,
    pub(super) ledger: L,
    pub(super) bindings: HashMap<AssetId, AssetBinding>,
    pub(super) prices: HashMap<AssetId, Price>,
    pub(super) snapshot: PortfolioSnapshot,
    pub(super) events: Vec<Event>,
    pub(super) next_event_id: u64,
    pub(super) current_time: Timestamp,
}

impl<L: TransferAgent> Engine<L> {
    pub fn new(config: EngineConfig, ledger: L) -> Self {
        Self {
            config,
            ledger,
            bindings: HashMap::new(),
            prices: HashMap::new(),
            snapshot: PortfolioSnapshot::empty(),
            events: Vec::new(),
            next_event_id: 1,
            current_time: Timestamp::from_millis(0),
        }
    }

    pub fn set_time(&mut self, timestamp: Timestamp) {
        self.current_time = timestamp;
    }

    pub fn time(&self) -> Timestamp {
        self.current_time
    }

    pub fn advance_time(&mut self, millis: i64) {
        self.current_time = Timestamp::from_millis(self.current_time.as_millis() + millis);
    }

    pub fn is_bound(&self, asset: AssetId) -> bool {
        self.bindings.contains_key(&asset)
    }

    /// Reserve currently held in `asset`.
    pub fn balance(&self, asset: AssetId) -> Result<Amount, EngineError> {
        Ok(self.binding(asset)?.reserve)
    }

    /// Lower share bound fixed at bind time.
    pub fn min_share(&self, asset: AssetId) -> Result<Share, EngineError> {
        Ok(self.binding(asset)?.band.min())
    }

    /// Upper share bound fixed at bind time.
    pub fn max_share(&self, asset: AssetId) -> Result<Share, EngineError> {
        Ok(self.binding(asset)?.band.max())
    }

    pub fn bound_assets(&self) -> impl Iterator<Item = AssetId> + '_ {
        self.bindings.keys().copied()
    }

    pub fn asset_count(&self) -> usize {
        self.bindings.len()
    }

    /// The cached valuation as of the last refresh.
    pub fn snapshot(&self) -> &PortfolioSnapshot {
        &self.snapshot
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    pub fn recent_events(&self, count: usize) -> &[Event] {
        let start = self.events.len().saturating_sub(count);
        &self.events[start..]
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub(super) fn binding(&self, asset: AssetId) -> Result<&AssetBinding, EngineError> {
        self.bindings.get(&asset).ok_or(EngineError::NotBound(asset))
    }

    pub(super) fn set_reserve(&mut self, asset: AssetId, reserve: Amount) {
        if let Some(binding) = self.bindings.get_mut(&asset) {
            binding.reserve = reserve;
        }
    }

    pub(super) fn emit_event(&mut self, payload: EventPayload) {
        let event = Event::new(EventId(self.next_event_id), self.current_time, payload);
        self.next_event_id += 1;

        if self.config.verbose {
            println!("[Event {}] {:?}", event.id.0, event.payload);
        }

        self.events.push(event);

        if self.events.len() > self.config.max_events {
            let drain_count = self.events.len() - self.config.max_events;
            self.events.drain(0..drain_count);
        }
    }
}
