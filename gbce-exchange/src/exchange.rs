//! The exchange listing registry and all-share index

use crate::error::ExchangeError;
use chrono::{DateTime, Duration, Utc};
use gbce_domain::{OrderSide, Stock, Symbol, Trade, DEFAULT_VWAP_WINDOW_MINUTES};
use rust_decimal::{Decimal, MathematicalOps};
use std::collections::HashMap;
use tracing::debug;

/// Exchange owns a collection of listed stocks keyed by normalized symbol
///
/// Listings are insert-only: a symbol is registered at most once and a
/// listed stock is owned by the exchange for its whole lifetime. Iteration
/// follows listing order so index accumulation is reproducible.
#[derive(Debug, Default)]
pub struct Exchange {
    listings: HashMap<Symbol, Stock>,
    listing_order: Vec<Symbol>,
}

impl Exchange {
    /// Create a new empty exchange
    pub fn new() -> Self {
        Self {
            listings: HashMap::new(),
            listing_order: Vec::new(),
        }
    }

    /// List a stock on the exchange
    ///
    /// # Errors
    /// Returns `ExchangeError::AlreadyListed` if a stock with the same
    /// normalized symbol is already registered; the existing listing is
    /// left untouched.
    pub fn list_stock(&mut self, stock: Stock) -> Result<(), ExchangeError> {
        let symbol = stock.symbol().clone();
        if self.listings.contains_key(&symbol) {
            return Err(ExchangeError::already_listed(symbol.as_str()));
        }
        debug!(symbol = %symbol, class = stock.class().name(), "stock listed");
        self.listing_order.push(symbol.clone());
        self.listings.insert(symbol, stock);
        Ok(())
    }

    /// Look up a listing by symbol
    ///
    /// The raw symbol is normalized (trim + upper-case) before lookup; a
    /// miss is a normal outcome, reported as `None`.
    pub fn get_stock(&self, symbol: &str) -> Option<&Stock> {
        let symbol = Symbol::new(symbol).ok()?;
        self.listings.get(&symbol)
    }

    /// Look up a listing by symbol for mutation
    pub fn get_stock_mut(&mut self, symbol: &str) -> Option<&mut Stock> {
        let symbol = Symbol::new(symbol).ok()?;
        self.listings.get_mut(&symbol)
    }

    /// Record an executed order against a listed stock
    ///
    /// # Errors
    /// Returns `ExchangeError::UnknownSymbol` if no stock is listed under
    /// the normalized symbol, and propagates quantity/price validation
    /// failures from the domain.
    pub fn record_trade(
        &mut self,
        symbol: &str,
        quantity: u64,
        side: OrderSide,
        price: Decimal,
    ) -> Result<Trade, ExchangeError> {
        self.record_trade_at(symbol, quantity, side, price, Utc::now())
    }

    /// Record an executed order at an explicit instant
    ///
    /// # Errors
    /// Same failure modes as [`Exchange::record_trade`]
    pub fn record_trade_at(
        &mut self,
        symbol: &str,
        quantity: u64,
        side: OrderSide,
        price: Decimal,
        executed_at: DateTime<Utc>,
    ) -> Result<Trade, ExchangeError> {
        let stock = self
            .get_stock_mut(symbol)
            .ok_or_else(|| ExchangeError::unknown_symbol(symbol.trim().to_uppercase()))?;
        let trade = stock.record_trade_at(quantity, side, price, executed_at)?;
        debug!(
            symbol = %stock.symbol(),
            quantity = trade.quantity.as_u64(),
            side = %trade.side,
            price = %trade.price,
            "trade recorded"
        );
        Ok(trade)
    }

    /// Calculate the GBCE all-share index over the default trailing window
    ///
    /// Geometric mean of the volume-weighted prices of every listing with
    /// recent trade activity. Listings with no in-window trades are
    /// excluded, not zero-filled. `None` when no listing produces a value.
    pub fn calculate_all_share_index(&self) -> Option<Decimal> {
        self.calculate_all_share_index_at(Utc::now())
    }

    /// Calculate the all-share index for a window ending at `now`
    ///
    /// Accumulated in listing order in the log domain
    /// (`exp(Σ ln(vwap) / n)`), which keeps the product from overflowing
    /// for large listings.
    pub fn calculate_all_share_index_at(&self, now: DateTime<Utc>) -> Option<Decimal> {
        let cutoff = now - Duration::minutes(DEFAULT_VWAP_WINDOW_MINUTES);
        let mut ln_sum = Decimal::ZERO;
        let mut priced: u64 = 0;
        for stock in self.stocks() {
            // checked_ln refuses non-positive values, which the Price
            // invariant already rules out of any volume-weighted price
            if let Some(ln) = stock
                .volume_weighted_price_since(cutoff)
                .and_then(|vwap| vwap.checked_ln())
            {
                ln_sum += ln;
                priced += 1;
            }
        }
        if priced == 0 {
            return None;
        }
        Some((ln_sum / Decimal::from(priced)).exp())
    }

    /// Iterate the listed stocks in listing order
    pub fn stocks(&self) -> impl Iterator<Item = &Stock> + '_ {
        self.listing_order
            .iter()
            .filter_map(|symbol| self.listings.get(symbol))
    }

    /// Get the listed symbols in listing order
    pub fn symbols(&self) -> &[Symbol] {
        &self.listing_order
    }

    /// Get the number of listings
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    /// Check whether the exchange has no listings
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
