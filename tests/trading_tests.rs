//! Integration tests for the registry lifecycle, oracle prices, quote
//! computation, and the trade path against the in-memory ledger.

use basket_core::*;
use rust_decimal_macros::dec;

const POOL: AccountId = AccountId(0);
const OPERATOR: AccountId = AccountId(1);
const TRADER: AccountId = AccountId(2);

const USD: AssetId = AssetId(1);
const GOLD: AssetId = AssetId(2);
const OIL: AssetId = AssetId(3);

// reserve and trade magnitudes match the pool's intended operating range
const RESERVE: u128 = 100_000_000_000_000_000; // 1e17
const TRADE: u128 = 500_000_000_000; // 5e11

fn pct(n: u128) -> Share {
    Share::new(n * WAD / 100)
}

/// Engine with every listed asset minted to the operator, approved, and
/// bound at a [30%, 70%] share band.
fn funded_engine(assets: &[(AssetId, u128)]) -> Engine<InMemoryLedger> {
    let mut ledger = InMemoryLedger::new(POOL);
    for &(asset, reserve) in assets {
        ledger.mint(asset, OPERATOR, Amount::new(reserve));
        ledger.approve(asset, OPERATOR, Amount::new(reserve));
    }

    let mut engine = Engine::new(EngineConfig::default(), ledger);
    for &(asset, reserve) in assets {
        engine
            .bind(OPERATOR, asset, Amount::new(reserve), pct(30), pct(70))
            .unwrap();
    }
    engine
}

fn fund_trader(engine: &mut Engine<InMemoryLedger>, asset: AssetId, amount: u128) {
    engine.ledger_mut().mint(asset, TRADER, Amount::new(amount));
    engine.ledger_mut().approve(asset, TRADER, Amount::new(amount));
}

#[test]
fn bind_records_reserve_and_band() {
    let engine = funded_engine(&[(GOLD, RESERVE)]);

    assert!(engine.is_bound(GOLD));
    assert!(!engine.is_bound(OIL));
    assert_eq!(engine.balance(GOLD).unwrap(), Amount::new(RESERVE));
    assert_eq!(engine.min_share(GOLD).unwrap(), pct(30));
    assert_eq!(engine.max_share(GOLD).unwrap(), pct(70));
    assert_eq!(engine.asset_count(), 1);

    // the seed reserve moved from the operator into pool custody
    assert_eq!(engine.ledger().balance_of(GOLD, OPERATOR), Amount::zero());
    assert_eq!(engine.ledger().balance_of(GOLD, POOL), Amount::new(RESERVE));
}

#[test]
fn bind_twice_rejects_and_preserves_first() {
    let mut engine = funded_engine(&[(GOLD, RESERVE)]);
    engine.ledger_mut().mint(GOLD, OPERATOR, Amount::new(RESERVE));
    engine.ledger_mut().approve(GOLD, OPERATOR, Amount::new(RESERVE));

    let result = engine.bind(OPERATOR, GOLD, Amount::new(42), pct(0), pct(100));
    assert!(matches!(result, Err(EngineError::AlreadyBound(a)) if a == GOLD));

    // first binding untouched, second pull never happened
    assert_eq!(engine.balance(GOLD).unwrap(), Amount::new(RESERVE));
    assert_eq!(engine.ledger().balance_of(GOLD, OPERATOR), Amount::new(RESERVE));
}

#[test]
fn bind_rejects_inverted_or_oversized_bounds() {
    let mut engine = funded_engine(&[]);
    engine.ledger_mut().mint(GOLD, OPERATOR, Amount::new(RESERVE));
    engine.ledger_mut().approve(GOLD, OPERATOR, Amount::new(RESERVE));

    let inverted = engine.bind(OPERATOR, GOLD, Amount::new(RESERVE), pct(70), pct(30));
    assert!(matches!(inverted, Err(EngineError::InvalidBounds { .. })));

    let oversized = engine.bind(
        OPERATOR,
        GOLD,
        Amount::new(RESERVE),
        pct(30),
        Share::new(WAD + 1),
    );
    assert!(matches!(oversized, Err(EngineError::InvalidBounds { .. })));

    // neither attempt pulled the reserve
    assert!(!engine.is_bound(GOLD));
    assert_eq!(engine.ledger().balance_of(GOLD, OPERATOR), Amount::new(RESERVE));
}

#[test]
fn bind_aborts_when_pull_fails() {
    let mut ledger = InMemoryLedger::new(POOL);
    ledger.mint(GOLD, OPERATOR, Amount::new(10));
    // no approval, so the pull must fail

    let mut engine = Engine::new(EngineConfig::default(), ledger);
    let result = engine.bind(OPERATOR, GOLD, Amount::new(10), pct(30), pct(70));

    assert!(matches!(result, Err(EngineError::TransferFailed(_))));
    assert!(!engine.is_bound(GOLD));
}

#[test]
fn unbind_returns_full_reserve() {
    let mut engine = funded_engine(&[(GOLD, RESERVE)]);

    let returned = engine.unbind(OPERATOR, GOLD).unwrap();

    assert_eq!(returned, Amount::new(RESERVE));
    assert!(!engine.is_bound(GOLD));
    assert!(matches!(engine.balance(GOLD), Err(EngineError::NotBound(_))));
    assert_eq!(engine.ledger().balance_of(GOLD, OPERATOR), Amount::new(RESERVE));
    assert_eq!(engine.ledger().balance_of(GOLD, POOL), Amount::zero());
}

#[test]
fn unbind_unknown_asset_rejects() {
    let mut engine = funded_engine(&[]);
    let result = engine.unbind(OPERATOR, GOLD);
    assert!(matches!(result, Err(EngineError::NotBound(a)) if a == GOLD));
}

#[test]
fn unbind_drops_stored_price() {
    let mut engine = funded_engine(&[(GOLD, RESERVE)]);
    engine.set_oracle_price(GOLD, Price::new_unchecked(WAD)).unwrap();
    engine.unbind(OPERATOR, GOLD).unwrap();

    // rebind: the old price must not survive
    engine.ledger_mut().approve(GOLD, OPERATOR, Amount::new(RESERVE));
    engine
        .bind(OPERATOR, GOLD, Amount::new(RESERVE), pct(30), pct(70))
        .unwrap();
    assert!(matches!(
        engine.oracle_price(GOLD),
        Err(EngineError::PriceNotSet(_))
    ));
}

#[test]
fn drain_empties_the_pool() {
    let mut engine = funded_engine(&[(USD, RESERVE), (GOLD, RESERVE), (OIL, RESERVE)]);

    let drained = engine.drain(OPERATOR).unwrap();

    assert_eq!(drained.len(), 3);
    assert_eq!(engine.asset_count(), 0);
    for (asset, reserve) in drained {
        assert_eq!(reserve, Amount::new(RESERVE));
        assert_eq!(engine.ledger().balance_of(asset, OPERATOR), Amount::new(RESERVE));
    }
}

#[test]
fn oracle_price_requires_binding() {
    let mut engine = funded_engine(&[(GOLD, RESERVE)]);

    let unbound = engine.set_oracle_price(OIL, Price::new_unchecked(WAD));
    assert!(matches!(unbound, Err(EngineError::NotBound(a)) if a == OIL));

    assert!(matches!(
        engine.oracle_price(GOLD),
        Err(EngineError::PriceNotSet(_))
    ));
    assert!(matches!(
        engine.oracle_price(OIL),
        Err(EngineError::NotBound(_))
    ));
}

#[test]
fn oracle_price_last_write_wins() {
    let mut engine = funded_engine(&[(GOLD, RESERVE)]);

    engine.set_oracle_price(GOLD, Price::new_unchecked(WAD)).unwrap();
    engine.set_oracle_price(GOLD, Price::new_unchecked(3 * WAD)).unwrap();

    assert_eq!(engine.oracle_price(GOLD).unwrap().value(), 3 * WAD);
}

#[test]
fn price_source_ingestion_normalizes_decimals() {
    let mut engine = funded_engine(&[(USD, RESERVE), (GOLD, RESERVE)]);

    let mut source = StaticPriceSource::new();
    source.set(USD, dec!(1));
    source.set(GOLD, dec!(1850.25));
    source.set(OIL, dec!(80)); // unbound, skipped

    let applied = engine.ingest_price_source(&source).unwrap();

    assert_eq!(applied, 2);
    assert_eq!(engine.oracle_price(USD).unwrap().value(), WAD);
    assert_eq!(
        engine.oracle_price(GOLD).unwrap().value(),
        1_850_250_000_000_000_000_000
    );
    assert!(matches!(
        engine.oracle_price(OIL),
        Err(EngineError::NotBound(_))
    ));
}

#[test]
fn price_source_rejects_zero_quote() {
    let mut engine = funded_engine(&[(GOLD, RESERVE)]);

    let mut source = StaticPriceSource::new();
    source.set(GOLD, dec!(0));

    let result = engine.ingest_price_source(&source);
    assert!(matches!(result, Err(EngineError::InvalidPrice(a)) if a == GOLD));
}

#[test]
fn rejected_ingestion_stores_no_prices() {
    let mut engine = funded_engine(&[(USD, RESERVE), (GOLD, RESERVE)]);

    // the valid quote comes first; the bad one must still void the batch
    let mut source = StaticPriceSource::new();
    source.set(USD, dec!(2));
    source.set(GOLD, dec!(0));

    let result = engine.ingest_price_source(&source);

    assert!(matches!(result, Err(EngineError::InvalidPrice(a)) if a == GOLD));
    assert!(matches!(
        engine.oracle_price(USD),
        Err(EngineError::PriceNotSet(_))
    ));
    assert!(engine.events().iter().all(|event| {
        !matches!(event.payload, EventPayload::OraclePriceSet(_))
    }));
}

#[test]
fn quotes_at_equal_prices_are_one_to_one() {
    let mut engine = funded_engine(&[(USD, RESERVE), (GOLD, RESERVE)]);
    engine.set_oracle_price(USD, Price::new_unchecked(WAD)).unwrap();
    engine.set_oracle_price(GOLD, Price::new_unchecked(WAD)).unwrap();

    let amount = Amount::new(TRADE);
    assert_eq!(engine.query_sell_base(GOLD, USD, amount).unwrap(), amount);
    assert_eq!(engine.query_buy_base(GOLD, USD, amount).unwrap(), amount);
}

#[test]
fn quotes_follow_the_price_ratio() {
    let mut engine = funded_engine(&[(USD, RESERVE), (GOLD, RESERVE), (OIL, RESERVE)]);
    engine.set_oracle_price(USD, Price::new_unchecked(WAD)).unwrap();
    engine.set_oracle_price(GOLD, Price::new_unchecked(10 * WAD)).unwrap();
    engine.set_oracle_price(OIL, Price::new_unchecked(WAD / 10)).unwrap();

    let amount = Amount::new(TRADE);

    // base worth 10x quote: buying 5e11 base costs 50e11 quote
    assert_eq!(
        engine.query_buy_base(GOLD, USD, amount).unwrap(),
        Amount::new(10 * TRADE)
    );
    // base worth 0.1x quote: selling 5e11 base yields 0.5e11 quote
    assert_eq!(
        engine.query_sell_base(OIL, USD, amount).unwrap(),
        Amount::new(TRADE / 10)
    );
    // cross pair, ratio 100
    assert_eq!(
        engine.query_sell_base(GOLD, OIL, amount).unwrap(),
        Amount::new(100 * TRADE)
    );
}

#[test]
fn quote_rejects_bad_inputs() {
    let mut engine = funded_engine(&[(USD, RESERVE), (GOLD, RESERVE)]);
    engine.set_oracle_price(USD, Price::new_unchecked(WAD)).unwrap();

    assert!(matches!(
        engine.query_sell_base(GOLD, GOLD, Amount::new(TRADE)),
        Err(EngineError::SameAsset(_))
    ));
    assert!(matches!(
        engine.query_sell_base(GOLD, USD, Amount::zero()),
        Err(EngineError::InvalidAmount)
    ));
    // GOLD bound but priceless
    assert!(matches!(
        engine.query_sell_base(GOLD, USD, Amount::new(TRADE)),
        Err(EngineError::PriceNotSet(_))
    ));
    assert!(matches!(
        engine.query_sell_base(OIL, USD, Amount::new(TRADE)),
        Err(EngineError::NotBound(_))
    ));
}

#[test]
fn quotes_are_pure_reads() {
    let mut engine = funded_engine(&[(USD, RESERVE), (GOLD, RESERVE)]);
    engine.set_oracle_price(USD, Price::new_unchecked(WAD)).unwrap();
    engine.set_oracle_price(GOLD, Price::new_unchecked(2 * WAD)).unwrap();

    let first = engine.query_sell_base(GOLD, USD, Amount::new(TRADE)).unwrap();
    for _ in 0..10 {
        assert_eq!(
            engine.query_sell_base(GOLD, USD, Amount::new(TRADE)).unwrap(),
            first
        );
    }
    assert_eq!(engine.balance(GOLD).unwrap(), Amount::new(RESERVE));
    assert_eq!(engine.balance(USD).unwrap(), Amount::new(RESERVE));
}

#[test]
fn sell_moves_reserves_and_ledger_balances() {
    let mut engine = funded_engine(&[(USD, RESERVE), (GOLD, RESERVE), (OIL, RESERVE)]);
    for asset in [USD, GOLD, OIL] {
        engine.set_oracle_price(asset, Price::new_unchecked(WAD)).unwrap();
    }
    fund_trader(&mut engine, GOLD, TRADE);

    let result = engine
        .sell_base(TRADER, GOLD, USD, Amount::new(TRADE), Amount::new(TRADE))
        .unwrap();

    assert_eq!(result.base_amount, Amount::new(TRADE));
    assert_eq!(result.quote_amount, Amount::new(TRADE));

    // pool reserves mirror the trade
    assert_eq!(engine.balance(GOLD).unwrap(), Amount::new(RESERVE + TRADE));
    assert_eq!(engine.balance(USD).unwrap(), Amount::new(RESERVE - TRADE));

    // trader swapped base for quote on the ledger
    assert_eq!(engine.ledger().balance_of(GOLD, TRADER), Amount::zero());
    assert_eq!(engine.ledger().balance_of(USD, TRADER), Amount::new(TRADE));

    // custody matches the registry
    assert_eq!(
        engine.ledger().balance_of(GOLD, POOL),
        engine.balance(GOLD).unwrap()
    );
    assert_eq!(
        engine.ledger().balance_of(USD, POOL),
        engine.balance(USD).unwrap()
    );
}

#[test]
fn buy_mirrors_sell() {
    let mut engine = funded_engine(&[(USD, RESERVE), (GOLD, RESERVE), (OIL, RESERVE)]);
    engine.set_oracle_price(USD, Price::new_unchecked(WAD)).unwrap();
    engine.set_oracle_price(GOLD, Price::new_unchecked(10 * WAD)).unwrap();
    engine.set_oracle_price(OIL, Price::new_unchecked(WAD)).unwrap();
    fund_trader(&mut engine, USD, 10 * TRADE);

    let result = engine
        .buy_base(TRADER, GOLD, USD, Amount::new(TRADE), Amount::new(10 * TRADE))
        .unwrap();

    assert_eq!(result.quote_amount, Amount::new(10 * TRADE));
    assert_eq!(engine.balance(GOLD).unwrap(), Amount::new(RESERVE - TRADE));
    assert_eq!(engine.balance(USD).unwrap(), Amount::new(RESERVE + 10 * TRADE));
    assert_eq!(engine.ledger().balance_of(GOLD, TRADER), Amount::new(TRADE));
    assert_eq!(engine.ledger().balance_of(USD, TRADER), Amount::zero());
}

#[test]
fn round_trip_returns_trader_to_start() {
    let mut engine = funded_engine(&[(USD, RESERVE), (GOLD, RESERVE), (OIL, RESERVE)]);
    for asset in [USD, GOLD, OIL] {
        engine.set_oracle_price(asset, Price::new_unchecked(WAD)).unwrap();
    }
    fund_trader(&mut engine, GOLD, TRADE);

    let sold = engine
        .sell_base(TRADER, GOLD, USD, Amount::new(TRADE), Amount::zero())
        .unwrap();

    engine
        .ledger_mut()
        .approve(USD, TRADER, sold.quote_amount);
    engine
        .buy_base(TRADER, GOLD, USD, Amount::new(TRADE), sold.quote_amount)
        .unwrap();

    // at unchanged 1:1 prices the round trip is exact
    assert_eq!(engine.ledger().balance_of(GOLD, TRADER), Amount::new(TRADE));
    assert_eq!(engine.ledger().balance_of(USD, TRADER), Amount::zero());
    assert_eq!(engine.balance(GOLD).unwrap(), Amount::new(RESERVE));
    assert_eq!(engine.balance(USD).unwrap(), Amount::new(RESERVE));
}

#[test]
fn sell_rejects_short_proceeds() {
    let mut engine = funded_engine(&[(USD, RESERVE), (GOLD, RESERVE), (OIL, RESERVE)]);
    for asset in [USD, GOLD, OIL] {
        engine.set_oracle_price(asset, Price::new_unchecked(WAD)).unwrap();
    }
    fund_trader(&mut engine, GOLD, TRADE);

    let result = engine.sell_base(
        TRADER,
        GOLD,
        USD,
        Amount::new(TRADE),
        Amount::new(TRADE + 1),
    );

    assert!(matches!(result, Err(EngineError::SlippageExceeded { .. })));
    assert_eq!(engine.balance(GOLD).unwrap(), Amount::new(RESERVE));
    assert_eq!(engine.ledger().balance_of(GOLD, TRADER), Amount::new(TRADE));
}

#[test]
fn buy_rejects_excess_cost() {
    let mut engine = funded_engine(&[(USD, RESERVE), (GOLD, RESERVE), (OIL, RESERVE)]);
    engine.set_oracle_price(USD, Price::new_unchecked(WAD)).unwrap();
    engine.set_oracle_price(GOLD, Price::new_unchecked(10 * WAD)).unwrap();
    engine.set_oracle_price(OIL, Price::new_unchecked(WAD)).unwrap();
    fund_trader(&mut engine, USD, 10 * TRADE);

    let result = engine.buy_base(
        TRADER,
        GOLD,
        USD,
        Amount::new(TRADE),
        Amount::new(10 * TRADE - 1),
    );

    assert!(matches!(result, Err(EngineError::SlippageExceeded { .. })));
    assert_eq!(engine.balance(GOLD).unwrap(), Amount::new(RESERVE));
    assert_eq!(engine.ledger().balance_of(USD, TRADER), Amount::new(10 * TRADE));
}

#[test]
fn failed_pull_aborts_the_trade() {
    let mut engine = funded_engine(&[(USD, RESERVE), (GOLD, RESERVE), (OIL, RESERVE)]);
    for asset in [USD, GOLD, OIL] {
        engine.set_oracle_price(asset, Price::new_unchecked(WAD)).unwrap();
    }
    // trader holds base but never approved the pull
    engine.ledger_mut().mint(GOLD, TRADER, Amount::new(TRADE));

    let result = engine.sell_base(TRADER, GOLD, USD, Amount::new(TRADE), Amount::zero());

    assert!(matches!(result, Err(EngineError::TransferFailed(_))));
    assert_eq!(engine.balance(GOLD).unwrap(), Amount::new(RESERVE));
    assert_eq!(engine.balance(USD).unwrap(), Amount::new(RESERVE));
    assert_eq!(engine.ledger().balance_of(GOLD, TRADER), Amount::new(TRADE));
}

/// Ledger double whose payouts of one asset always fail, for exercising
/// the refund after a successful pull.
struct StuckPayoutLedger {
    inner: InMemoryLedger,
    stuck: AssetId,
}

impl TransferAgent for StuckPayoutLedger {
    fn transfer_from(
        &mut self,
        asset: AssetId,
        holder: AccountId,
        recipient: AccountId,
        amount: Amount,
    ) -> Result<(), TransferError> {
        self.inner.transfer_from(asset, holder, recipient, amount)
    }

    fn transfer(
        &mut self,
        asset: AssetId,
        recipient: AccountId,
        amount: Amount,
    ) -> Result<(), TransferError> {
        if asset == self.stuck {
            return Err(TransferError::InsufficientBalance {
                asset,
                account: self.inner.custody(),
                available: Amount::zero(),
                requested: amount,
            });
        }
        self.inner.transfer(asset, recipient, amount)
    }
}

/// Two-asset engine on the stuck-payout double, trader funded in `funded`.
fn stuck_payout_engine(stuck: AssetId, funded: AssetId) -> Engine<StuckPayoutLedger> {
    let mut inner = InMemoryLedger::new(POOL);
    for asset in [USD, GOLD] {
        inner.mint(asset, OPERATOR, Amount::new(RESERVE));
        inner.approve(asset, OPERATOR, Amount::new(RESERVE));
    }
    inner.mint(funded, TRADER, Amount::new(TRADE));
    inner.approve(funded, TRADER, Amount::new(TRADE));

    let mut engine = Engine::new(EngineConfig::default(), StuckPayoutLedger { inner, stuck });
    for asset in [USD, GOLD] {
        engine
            .bind(OPERATOR, asset, Amount::new(RESERVE), pct(30), pct(70))
            .unwrap();
        engine.set_oracle_price(asset, Price::new_unchecked(WAD)).unwrap();
    }
    engine
}

#[test]
fn sell_with_failed_payout_refunds_the_pull() {
    let mut engine = stuck_payout_engine(USD, GOLD);

    let result = engine.sell_base(TRADER, GOLD, USD, Amount::new(TRADE), Amount::zero());

    assert!(matches!(result, Err(EngineError::TransferFailed(_))));
    assert_eq!(engine.balance(GOLD).unwrap(), Amount::new(RESERVE));
    assert_eq!(engine.balance(USD).unwrap(), Amount::new(RESERVE));

    // the pulled base went back to the trader, custody is level again
    let inner = &engine.ledger().inner;
    assert_eq!(inner.balance_of(GOLD, TRADER), Amount::new(TRADE));
    assert_eq!(inner.balance_of(GOLD, POOL), Amount::new(RESERVE));
    assert_eq!(inner.balance_of(USD, TRADER), Amount::zero());
}

#[test]
fn buy_with_failed_payout_refunds_the_pull() {
    let mut engine = stuck_payout_engine(GOLD, USD);

    let result = engine.buy_base(TRADER, GOLD, USD, Amount::new(TRADE), Amount::new(TRADE));

    assert!(matches!(result, Err(EngineError::TransferFailed(_))));
    assert_eq!(engine.balance(GOLD).unwrap(), Amount::new(RESERVE));
    assert_eq!(engine.balance(USD).unwrap(), Amount::new(RESERVE));

    let inner = &engine.ledger().inner;
    assert_eq!(inner.balance_of(USD, TRADER), Amount::new(TRADE));
    assert_eq!(inner.balance_of(USD, POOL), Amount::new(RESERVE));
    assert_eq!(inner.balance_of(GOLD, TRADER), Amount::zero());
}

#[test]
fn trade_events_record_executions_and_rejections() {
    let mut engine = funded_engine(&[(USD, RESERVE), (GOLD, RESERVE), (OIL, RESERVE)]);
    for asset in [USD, GOLD, OIL] {
        engine.set_oracle_price(asset, Price::new_unchecked(WAD)).unwrap();
    }
    fund_trader(&mut engine, GOLD, 2 * TRADE);

    engine
        .sell_base(TRADER, GOLD, USD, Amount::new(TRADE), Amount::zero())
        .unwrap();
    let _ = engine.sell_base(
        TRADER,
        GOLD,
        USD,
        Amount::new(TRADE),
        Amount::new(2 * TRADE),
    );

    let recent = engine.recent_events(2);
    assert!(matches!(recent[0].payload, EventPayload::TradeExecuted(_)));
    assert!(matches!(recent[1].payload, EventPayload::TradeRejected(_)));
}
