// 7.0: every state change produces an event. used for audit trails, state
// reconstruction, and notifying external systems. the EventPayload enum lists
// all event types.

use crate::types::{AccountId, Amount, AssetId, Price, Share, Timestamp, TradeSide, Value};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(pub u64);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub timestamp: Timestamp,
    pub payload: EventPayload,
}

impl Event {
    pub fn new(id: EventId, timestamp: Timestamp, payload: EventPayload) -> Self {
        Self {
            id,
            timestamp,
            payload,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EventPayload {
    // Registry events
    AssetBound(AssetBoundEvent),
    AssetUnbound(AssetUnboundEvent),

    // Price events
    OraclePriceSet(OraclePriceSetEvent),

    // Valuation events
    PortfolioRefreshed(PortfolioRefreshedEvent),

    // Trade events
    TradeExecuted(TradeExecutedEvent),
    TradeRejected(TradeRejectedEvent),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetBoundEvent {
    pub asset: AssetId,
    pub initial_reserve: Amount,
    pub min_share: Share,
    pub max_share: Share,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetUnboundEvent {
    pub asset: AssetId,
    pub returned_reserve: Amount,
    pub recipient: AccountId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OraclePriceSetEvent {
    pub asset: AssetId,
    pub price: Price,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioRefreshedEvent {
    pub total_value: Value,
    pub asset_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeExecutedEvent {
    pub trader: AccountId,
    pub base: AssetId,
    pub quote: AssetId,
    pub side: TradeSide,
    pub base_amount: Amount,
    pub quote_amount: Amount,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeRejectedEvent {
    pub trader: AccountId,
    pub base: AssetId,
    pub quote: AssetId,
    pub side: TradeSide,
    pub reason: String,
}

pub trait EventEmitter {
    fn emit(&mut self, event: Event);
}

#[derive(Debug, Default)]
pub struct EventCollector {
    events: Vec<Event>,
    next_id: u64,
}

impl EventCollector {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            next_id: 1,
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn next_id(&mut self) -> EventId {
        let id = EventId(self.next_id);
        self.next_id += 1;
        id
    }
}

impl EventEmitter for EventCollector {
    fn emit(&mut self, event: Event) {
        self.events.push(event);
    }
}
