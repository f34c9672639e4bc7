//! Pooled-Value Engine Simulation.
//!
//! Demonstrates the full pool lifecycle including asset binding, oracle
//! pricing, portfolio valuation, oracle-mid swaps, share-band admission
//! control, and wind-down.

use basket_core::*;
use rust_decimal_macros::dec;

const POOL: AccountId = AccountId(0);
const OPERATOR: AccountId = AccountId(1);
const TRADER: AccountId = AccountId(2);

const USD: AssetId = AssetId(1);
const GOLD: AssetId = AssetId(2);
const OIL: AssetId = AssetId(3);

const RESERVE: u128 = 100_000_000_000_000_000; // 1e17 native units
const TRADE: u128 = 500_000_000_000; // 5e11 native units

fn main() {
    println!("Pooled-Value Engine Simulation");
    println!("Oracle-Mid Pricing, Share-Band Admission Control\n");

    scenario_1_bootstrap();
    scenario_2_quotes();
    scenario_3_trading();
    scenario_4_band_rejection();
    scenario_5_stale_snapshot();
    scenario_6_wind_down();

    println!("\nAll simulations completed successfully.");
}

fn pct(n: u128) -> Share {
    Share::new(n * WAD / 100)
}

/// Pool with USD, GOLD, and OIL bound at [30%, 70%] and priced 1:1.
fn balanced_pool() -> Engine<InMemoryLedger> {
    let mut ledger = InMemoryLedger::new(POOL);
    for asset in [USD, GOLD, OIL] {
        ledger.mint(asset, OPERATOR, Amount::new(RESERVE));
        ledger.approve(asset, OPERATOR, Amount::new(RESERVE));
    }

    let mut engine = Engine::new(EngineConfig::default(), ledger);
    for asset in [USD, GOLD, OIL] {
        engine
            .bind(OPERATOR, asset, Amount::new(RESERVE), pct(30), pct(70))
            .unwrap();
        engine.set_oracle_price(asset, Price::new_unchecked(WAD)).unwrap();
    }
    engine
}

/// Binding assets and refreshing the first valuation.
fn scenario_1_bootstrap() {
    println!("Scenario 1: Bootstrap and First Valuation\n");

    let mut engine = balanced_pool();
    println!("  Bound {} assets, reserve {} each, band [30%, 70%]", engine.asset_count(), Amount::new(RESERVE));

    let mut source = StaticPriceSource::new();
    source.set(USD, dec!(1));
    source.set(GOLD, dec!(1));
    source.set(OIL, dec!(1));
    let applied = engine.ingest_price_source(&source).unwrap();
    println!("  Ingested {} quotes from the price source", applied);

    let result = engine.update_portfolio_value().unwrap();
    println!("  Total portfolio value: {}", result.total_value);
    for asset in [USD, GOLD, OIL] {
        println!("  Share of asset {}: {}", asset.0, engine.current_share(asset).unwrap());
    }
    println!();
}

/// Quote queries at different price ratios.
fn scenario_2_quotes() {
    println!("Scenario 2: Oracle-Mid Quotes\n");

    let mut engine = balanced_pool();
    engine.set_oracle_price(GOLD, Price::new_unchecked(10 * WAD)).unwrap();

    let sell = engine.query_sell_base(GOLD, USD, Amount::new(TRADE)).unwrap();
    let buy = engine.query_buy_base(GOLD, USD, Amount::new(TRADE)).unwrap();

    println!("  GOLD priced 10x USD");
    println!("  Selling {} GOLD yields {} USD", Amount::new(TRADE), sell);
    println!("  Buying {} GOLD costs {} USD", Amount::new(TRADE), buy);
    println!("  No spread: buy and sell sit on the same mid rate\n");
}

/// A sell and the exact round trip back.
fn scenario_3_trading() {
    println!("Scenario 3: Trade and Round Trip\n");

    let mut engine = balanced_pool();
    engine.ledger_mut().mint(GOLD, TRADER, Amount::new(TRADE));
    engine.ledger_mut().approve(GOLD, TRADER, Amount::new(TRADE));

    let sold = engine
        .sell_base(TRADER, GOLD, USD, Amount::new(TRADE), Amount::zero())
        .unwrap();
    println!("  Sold {} GOLD for {} USD", sold.base_amount, sold.quote_amount);
    println!("  Pool reserves: GOLD {}, USD {}", engine.balance(GOLD).unwrap(), engine.balance(USD).unwrap());

    engine.ledger_mut().approve(USD, TRADER, sold.quote_amount);
    let bought = engine
        .buy_base(TRADER, GOLD, USD, Amount::new(TRADE), sold.quote_amount)
        .unwrap();
    println!("  Bought back {} GOLD for {} USD", bought.base_amount, bought.quote_amount);
    println!("  Trader GOLD balance: {}\n", engine.ledger().balance_of(GOLD, TRADER));
}

/// An oversized trade hits the share band and rolls back.
fn scenario_4_band_rejection() {
    println!("Scenario 4: Share-Band Rejection\n");

    let mut engine = balanced_pool();
    let oversized = 5 * WAD;
    engine.ledger_mut().mint(GOLD, TRADER, Amount::new(oversized));
    engine.ledger_mut().approve(GOLD, TRADER, Amount::new(oversized));

    println!("  Selling {} GOLD into {} reserves...", Amount::new(oversized), Amount::new(RESERVE));
    match engine.sell_base(TRADER, GOLD, USD, Amount::new(oversized), Amount::zero()) {
        Ok(_) => println!("  UNEXPECTED: trade admitted"),
        Err(error) => println!("  Rejected: {}", error),
    }
    println!("  GOLD reserve unchanged: {}\n", engine.balance(GOLD).unwrap());
}

/// The cached snapshot lags live prices until the next refresh.
fn scenario_5_stale_snapshot() {
    println!("Scenario 5: Snapshot Staleness\n");

    let mut engine = balanced_pool();
    engine.update_portfolio_value().unwrap();
    println!("  GOLD share after refresh: {}", engine.current_share(GOLD).unwrap());

    engine.set_oracle_price(GOLD, Price::new_unchecked(2 * WAD)).unwrap();
    println!("  GOLD repriced to 2.0, cached share still: {}", engine.current_share(GOLD).unwrap());

    engine.update_portfolio_value().unwrap();
    println!("  GOLD share after second refresh: {}\n", engine.current_share(GOLD).unwrap());
}

/// Draining every binding back to the operator.
fn scenario_6_wind_down() {
    println!("Scenario 6: Wind-Down\n");

    let mut engine = balanced_pool();
    let drained = engine.drain(OPERATOR).unwrap();

    for (asset, reserve) in &drained {
        println!("  Returned {} units of asset {}", reserve, asset.0);
    }
    println!("  Assets still bound: {}", engine.asset_count());
    println!("  Events recorded: {}", engine.events().len());
}
