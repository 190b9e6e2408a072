//! Fixture builders for exchange tests.

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use gbce_domain::{OrderSide, Stock};
use gbce_exchange::Exchange;

/// The canonical GBCE sample listings.
///
/// TEA, POP, ALE and JOE are common stock; GIN is preferred with a 2%
/// fixed dividend. Values are pence per share.
pub fn sample_listings() -> Result<Vec<Stock>> {
    Ok(vec![
        Stock::common("TEA", dec!(0), dec!(100))?,
        Stock::common("POP", dec!(8), dec!(100))?,
        Stock::common("ALE", dec!(23), dec!(60))?,
        Stock::preferred("GIN", dec!(8), dec!(100), dec!(0.02))?,
        Stock::common("JOE", dec!(13), dec!(250))?,
    ])
}

/// An exchange with the canonical sample listings registered, no trades.
pub fn sample_exchange() -> Result<Exchange> {
    let mut exchange = Exchange::new();
    for stock in sample_listings()? {
        exchange.list_stock(stock)?;
    }
    Ok(exchange)
}

/// Record a script of trades against a stock, all at the same instant.
///
/// Each entry is `(quantity, side, price)`. Returns the stock for chaining
/// into listings.
pub fn with_trades_at(
    mut stock: Stock,
    trades: &[(u64, OrderSide, Decimal)],
    executed_at: DateTime<Utc>,
) -> Result<Stock> {
    for &(quantity, side, price) in trades {
        stock.record_trade_at(quantity, side, price, executed_at)?;
    }
    Ok(stock)
}

/// The instant `minutes` before `instant`.
pub fn minutes_before(instant: DateTime<Utc>, minutes: i64) -> DateTime<Utc> {
    instant - Duration::minutes(minutes)
}
