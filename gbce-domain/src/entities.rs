//! Domain Entities for the GBCE stock market
//!
//! A `Stock` owns its valuation parameters and an append-only history of
//! executed `Trade`s; every metric is a pure read over that state.

use crate::value_objects::{DomainError, OrderSide, Price, Quantity, StockClass, Symbol};
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a Trade (UUID v7, time-ordered)
pub type TradeId = Uuid;

/// Default trailing window for volume-weighted price calculations, in minutes
pub const DEFAULT_VWAP_WINDOW_MINUTES: i64 = 5;

// =============================================================================
// Trade
// =============================================================================

/// Trade is an immutable record of one executed order
///
/// Constructed only through [`Stock::record_trade`] (or its explicit-instant
/// variant) and owned by the recording stock for its whole lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Unique trade identifier
    pub id: TradeId,
    /// Instant the order executed
    pub executed_at: DateTime<Utc>,
    /// Number of shares exchanged
    pub quantity: Quantity,
    /// Direction of the executed order
    pub side: OrderSide,
    /// Price per share, in pence
    pub price: Price,
}

impl Trade {
    fn new(quantity: Quantity, side: OrderSide, price: Price, executed_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            executed_at,
            quantity,
            side,
            price,
        }
    }

    /// Total value of the trade (price × quantity)
    pub fn notional(&self) -> Decimal {
        self.price.as_decimal() * self.quantity.as_decimal()
    }
}

// =============================================================================
// Stock
// =============================================================================

/// Stock is a listed security with fixed valuation parameters and a growing
/// trade history
///
/// Trades accumulate monotonically; nothing is ever removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stock {
    symbol: Symbol,
    class: StockClass,
    last_dividend: Decimal,
    par_value: Price,
    trades: Vec<Trade>,
}

impl Stock {
    /// Create a stock with explicit valuation parameters
    ///
    /// # Errors
    /// Returns `DomainError::InvalidDividend` if the last dividend, or the
    /// fixed dividend rate of a preferred class, is negative
    pub fn new(
        symbol: Symbol,
        class: StockClass,
        last_dividend: Decimal,
        par_value: Price,
    ) -> Result<Self, DomainError> {
        if last_dividend < Decimal::ZERO {
            return Err(DomainError::InvalidDividend(
                "last dividend must not be negative".to_string(),
            ));
        }
        if let StockClass::Preferred { fixed_dividend } = class {
            if fixed_dividend < Decimal::ZERO {
                return Err(DomainError::InvalidDividend(
                    "fixed dividend rate must not be negative".to_string(),
                ));
            }
        }
        Ok(Self {
            symbol,
            class,
            last_dividend,
            par_value,
            trades: Vec::new(),
        })
    }

    /// Create a common stock
    ///
    /// # Examples
    /// ```
    /// # use gbce_domain::Stock;
    /// # use rust_decimal_macros::dec;
    /// let pop = Stock::common("POP", dec!(8), dec!(100)).unwrap();
    /// assert_eq!(pop.symbol().as_str(), "POP");
    /// ```
    ///
    /// # Errors
    /// Returns `DomainError` if the symbol is blank, the par value is not
    /// positive, or the last dividend is negative
    pub fn common(
        symbol: &str,
        last_dividend: Decimal,
        par_value: Decimal,
    ) -> Result<Self, DomainError> {
        Self::new(
            Symbol::new(symbol)?,
            StockClass::Common,
            last_dividend,
            Price::new(par_value)?,
        )
    }

    /// Create a preferred stock with its contractual dividend rate
    ///
    /// # Errors
    /// Returns `DomainError` if the symbol is blank, the par value is not
    /// positive, or either dividend value is negative
    pub fn preferred(
        symbol: &str,
        last_dividend: Decimal,
        par_value: Decimal,
        fixed_dividend: Decimal,
    ) -> Result<Self, DomainError> {
        Self::new(
            Symbol::new(symbol)?,
            StockClass::Preferred { fixed_dividend },
            last_dividend,
            Price::new(par_value)?,
        )
    }

    /// Get the normalized ticker identity
    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Get the valuation class
    pub fn class(&self) -> &StockClass {
        &self.class
    }

    /// Get the last dividend, in pence per share
    pub fn last_dividend(&self) -> Decimal {
        self.last_dividend
    }

    /// Get the par value
    pub fn par_value(&self) -> Price {
        self.par_value
    }

    /// Get the recorded trades, oldest first
    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    /// Calculate the dividend yield at the given market price
    ///
    /// Common stock yields `last_dividend / price`; preferred stock yields
    /// `fixed_dividend × par_value / price`.
    ///
    /// # Examples
    /// ```
    /// # use gbce_domain::Stock;
    /// # use rust_decimal_macros::dec;
    /// let gin = Stock::preferred("GIN", dec!(8), dec!(100), dec!(0.02)).unwrap();
    /// let yield_ = gin.calculate_dividend_yield(dec!(120)).unwrap();
    /// assert_eq!(yield_.round_dp(5), dec!(0.01667));
    /// ```
    ///
    /// # Errors
    /// Returns `DomainError::InvalidPrice` if price <= 0
    pub fn calculate_dividend_yield(&self, price: Decimal) -> Result<Decimal, DomainError> {
        let price = Price::new(price)?;
        match self.class {
            StockClass::Common => Ok(self.last_dividend / price.as_decimal()),
            StockClass::Preferred { fixed_dividend } => {
                Ok(fixed_dividend * self.par_value.as_decimal() / price.as_decimal())
            }
        }
    }

    /// Calculate the price/earnings ratio at the given market price
    ///
    /// A zero last dividend leaves the ratio undefined; that is a legitimate
    /// financial condition, reported as `Ok(None)` rather than an error.
    ///
    /// # Errors
    /// Returns `DomainError::InvalidPrice` if price <= 0
    pub fn calculate_pe_ratio(&self, price: Decimal) -> Result<Option<Decimal>, DomainError> {
        let price = Price::new(price)?;
        if self.last_dividend.is_zero() {
            return Ok(None);
        }
        Ok(Some(price.as_decimal() / self.last_dividend))
    }

    /// Record an executed order against this stock
    ///
    /// Validates quantity and price, stamps the current instant, appends the
    /// trade to the history and returns a copy of the stored record.
    ///
    /// # Errors
    /// Returns `DomainError::InvalidQuantity` if quantity is zero and
    /// `DomainError::InvalidPrice` if price <= 0, checked independently
    pub fn record_trade(
        &mut self,
        quantity: u64,
        side: OrderSide,
        price: Decimal,
    ) -> Result<Trade, DomainError> {
        self.record_trade_at(quantity, side, price, Utc::now())
    }

    /// Record an executed order at an explicit instant
    ///
    /// Normal recording flow never passes a timestamp; this variant is the
    /// deterministic seam for window tests and replay.
    ///
    /// # Errors
    /// Same validation as [`Stock::record_trade`]
    pub fn record_trade_at(
        &mut self,
        quantity: u64,
        side: OrderSide,
        price: Decimal,
        executed_at: DateTime<Utc>,
    ) -> Result<Trade, DomainError> {
        let quantity = Quantity::new(quantity)?;
        let price = Price::new(price)?;
        let trade = Trade::new(quantity, side, price, executed_at);
        self.trades.push(trade.clone());
        Ok(trade)
    }

    /// Calculate the volume-weighted price over a trailing window ending now
    ///
    /// The window slides with the wall clock: repeated calls over time can
    /// return different results with no new trades.
    ///
    /// # Errors
    /// Returns `DomainError::InvalidWindow` if `window_minutes` <= 0
    pub fn calculate_volume_weighted_price(
        &self,
        window_minutes: i64,
    ) -> Result<Option<Decimal>, DomainError> {
        self.calculate_volume_weighted_price_at(window_minutes, Utc::now())
    }

    /// Calculate the volume-weighted price over a window ending at `now`
    ///
    /// # Errors
    /// Returns `DomainError::InvalidWindow` if `window_minutes` <= 0
    pub fn calculate_volume_weighted_price_at(
        &self,
        window_minutes: i64,
        now: DateTime<Utc>,
    ) -> Result<Option<Decimal>, DomainError> {
        if window_minutes <= 0 {
            return Err(DomainError::InvalidWindow(
                "window must be a positive number of minutes".to_string(),
            ));
        }
        Ok(self.volume_weighted_price_since(now - Duration::minutes(window_minutes)))
    }

    /// Volume-weighted price of all trades executed at or after `cutoff`
    ///
    /// `Σ(price × quantity) / Σ(quantity)` over the in-window trades.
    /// `None` when no trade falls in the window; absence of recent trading
    /// is a normal condition, not an error.
    pub fn volume_weighted_price_since(&self, cutoff: DateTime<Utc>) -> Option<Decimal> {
        let mut notional = Decimal::ZERO;
        let mut volume = Decimal::ZERO;
        for trade in self.trades.iter().filter(|t| t.executed_at >= cutoff) {
            notional += trade.notional();
            volume += trade.quantity.as_decimal();
        }
        // zero volume is unreachable while Quantity enforces > 0, but the
        // division must never be attempted on it
        if volume.is_zero() {
            return None;
        }
        Some(notional / volume)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn tea() -> Stock {
        Stock::common("TEA", dec!(0), dec!(100)).unwrap()
    }

    fn pop() -> Stock {
        Stock::common("POP", dec!(8), dec!(100)).unwrap()
    }

    fn gin() -> Stock {
        Stock::preferred("GIN", dec!(8), dec!(100), dec!(0.02)).unwrap()
    }

    // Construction tests
    #[test]
    fn test_common_stock_creation() {
        let stock = tea();
        assert_eq!(stock.symbol().as_str(), "TEA");
        assert_eq!(stock.class(), &StockClass::Common);
        assert!(stock.trades().is_empty());
    }

    #[test]
    fn test_preferred_stock_creation() {
        let stock = gin();
        assert_eq!(
            stock.class(),
            &StockClass::Preferred {
                fixed_dividend: dec!(0.02)
            }
        );
    }

    #[test]
    fn test_stock_symbol_normalized() {
        let stock = Stock::common("  pop  ", dec!(8), dec!(100)).unwrap();
        assert_eq!(stock.symbol().as_str(), "POP");
    }

    #[test]
    fn test_negative_dividend_rejected() {
        assert!(Stock::common("POP", dec!(-1), dec!(100)).is_err());
        assert!(Stock::preferred("GIN", dec!(8), dec!(100), dec!(-0.02)).is_err());
    }

    #[test]
    fn test_non_positive_par_value_rejected() {
        assert!(Stock::common("POP", dec!(8), dec!(0)).is_err());
    }

    // Dividend yield tests
    #[test]
    fn test_common_dividend_yield() {
        let yield_ = pop().calculate_dividend_yield(dec!(120)).unwrap();
        assert_eq!(yield_, dec!(8) / dec!(120));
        assert!((yield_ - dec!(0.0667)).abs() < dec!(0.0001));
    }

    #[test]
    fn test_preferred_dividend_yield() {
        let yield_ = gin().calculate_dividend_yield(dec!(120)).unwrap();
        // (0.02 × 100) / 120
        assert!((yield_ - dec!(0.01667)).abs() < dec!(0.0001));
    }

    #[test]
    fn test_dividend_yield_decreases_with_price() {
        let stock = pop();
        let at_100 = stock.calculate_dividend_yield(dec!(100)).unwrap();
        let at_120 = stock.calculate_dividend_yield(dec!(120)).unwrap();
        let at_150 = stock.calculate_dividend_yield(dec!(150)).unwrap();
        assert!(at_100 > at_120);
        assert!(at_120 > at_150);
    }

    #[test]
    fn test_dividend_yield_invalid_price() {
        assert!(pop().calculate_dividend_yield(dec!(0)).is_err());
        assert!(gin().calculate_dividend_yield(dec!(-5)).is_err());
    }

    // P/E ratio tests
    #[test]
    fn test_pe_ratio_calculation() {
        let pe = pop().calculate_pe_ratio(dec!(120)).unwrap();
        assert_eq!(pe, Some(dec!(15)));
    }

    #[test]
    fn test_pe_ratio_round_trips_through_dividend() {
        let stock = pop();
        for price in [dec!(1), dec!(95), dec!(120), dec!(250.5)] {
            let pe = stock.calculate_pe_ratio(price).unwrap().unwrap();
            assert_eq!(pe * stock.last_dividend(), price);
        }
    }

    #[test]
    fn test_pe_ratio_zero_dividend_has_no_value() {
        assert_eq!(tea().calculate_pe_ratio(dec!(120)).unwrap(), None);
        assert_eq!(tea().calculate_pe_ratio(dec!(1)).unwrap(), None);
    }

    #[test]
    fn test_pe_ratio_invalid_price() {
        assert!(pop().calculate_pe_ratio(dec!(0)).is_err());
    }

    // Trade recording tests
    #[test]
    fn test_record_trade_appends_to_history() {
        let mut stock = tea();
        let trade = stock.record_trade(100, OrderSide::Buy, dec!(105)).unwrap();
        assert_eq!(trade.quantity.as_u64(), 100);
        assert_eq!(trade.price.as_decimal(), dec!(105));
        assert_eq!(stock.trades().len(), 1);
        assert_eq!(stock.trades()[0].id, trade.id);

        stock.record_trade(50, OrderSide::Sell, dec!(110)).unwrap();
        assert_eq!(stock.trades().len(), 2);
    }

    #[test]
    fn test_record_trade_invalid_quantity() {
        let mut stock = tea();
        for side in [OrderSide::Buy, OrderSide::Sell] {
            let err = stock.record_trade(0, side, dec!(105)).unwrap_err();
            assert!(matches!(err, DomainError::InvalidQuantity(_)));
        }
        assert!(stock.trades().is_empty());
    }

    #[test]
    fn test_record_trade_invalid_price() {
        let mut stock = tea();
        for side in [OrderSide::Buy, OrderSide::Sell] {
            let err = stock.record_trade(100, side, dec!(0)).unwrap_err();
            assert!(matches!(err, DomainError::InvalidPrice(_)));
            let err = stock.record_trade(100, side, dec!(-10)).unwrap_err();
            assert!(matches!(err, DomainError::InvalidPrice(_)));
        }
        assert!(stock.trades().is_empty());
    }

    // Volume-weighted price tests
    #[test]
    fn test_vwap_weights_by_quantity() {
        let now = Utc::now();
        let mut stock = tea();
        stock
            .record_trade_at(100, OrderSide::Buy, dec!(105), now)
            .unwrap();
        stock
            .record_trade_at(50, OrderSide::Sell, dec!(110), now)
            .unwrap();
        stock
            .record_trade_at(150, OrderSide::Buy, dec!(108), now)
            .unwrap();

        let vwap = stock
            .calculate_volume_weighted_price_at(5, now)
            .unwrap()
            .unwrap();
        // (100×105 + 50×110 + 150×108) / 300
        assert_eq!(vwap, dec!(32200) / dec!(300));
    }

    #[test]
    fn test_vwap_empty_history_has_no_value() {
        assert_eq!(tea().calculate_volume_weighted_price(5).unwrap(), None);
    }

    #[test]
    fn test_vwap_excludes_trades_before_cutoff() {
        let now = Utc::now();
        let mut stock = tea();
        stock
            .record_trade_at(100, OrderSide::Buy, dec!(90), now - Duration::minutes(10))
            .unwrap();
        stock
            .record_trade_at(100, OrderSide::Buy, dec!(105), now - Duration::minutes(2))
            .unwrap();

        let vwap = stock
            .calculate_volume_weighted_price_at(5, now)
            .unwrap()
            .unwrap();
        assert_eq!(vwap, dec!(105));
    }

    #[test]
    fn test_vwap_window_lower_bound_is_inclusive() {
        let now = Utc::now();
        let mut stock = tea();
        stock
            .record_trade_at(100, OrderSide::Buy, dec!(105), now - Duration::minutes(5))
            .unwrap();

        let vwap = stock.calculate_volume_weighted_price_at(5, now).unwrap();
        assert_eq!(vwap, Some(dec!(105)));
    }

    #[test]
    fn test_vwap_all_trades_stale_has_no_value() {
        let now = Utc::now();
        let mut stock = tea();
        stock
            .record_trade_at(100, OrderSide::Buy, dec!(105), now - Duration::minutes(30))
            .unwrap();

        assert_eq!(stock.calculate_volume_weighted_price_at(5, now).unwrap(), None);
    }

    #[test]
    fn test_vwap_is_idempotent_without_new_trades() {
        let mut stock = tea();
        stock.record_trade(100, OrderSide::Buy, dec!(105)).unwrap();
        let first = stock.calculate_volume_weighted_price(5).unwrap();
        let second = stock.calculate_volume_weighted_price(5).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_vwap_invalid_window() {
        let stock = tea();
        for window in [0, -5] {
            let err = stock.calculate_volume_weighted_price(window).unwrap_err();
            assert!(matches!(err, DomainError::InvalidWindow(_)));
        }
    }

    // Serialization
    #[test]
    fn test_stock_serde_round_trip() {
        let mut stock = gin();
        stock.record_trade(300, OrderSide::Sell, dec!(102)).unwrap();

        let json = serde_json::to_string(&stock).unwrap();
        let back: Stock = serde_json::from_str(&json).unwrap();
        assert_eq!(back.symbol(), stock.symbol());
        assert_eq!(back.class(), stock.class());
        assert_eq!(back.trades(), stock.trades());
    }
}
