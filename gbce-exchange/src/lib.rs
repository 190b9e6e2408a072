//! GBCE Exchange Layer
//!
//! In-memory listing registry for the Global Beverage Corporation Exchange:
//! stocks keyed by normalized symbol, trade recording against listings, and
//! the cross-stock all-share index.
//!
//! # Usage
//!
//! ```rust
//! use gbce_domain::{OrderSide, Stock};
//! use gbce_exchange::Exchange;
//! use rust_decimal_macros::dec;
//!
//! let mut exchange = Exchange::new();
//! exchange
//!     .list_stock(Stock::common("TEA", dec!(0), dec!(100)).unwrap())
//!     .unwrap();
//!
//! exchange
//!     .record_trade("TEA", 100, OrderSide::Buy, dec!(105))
//!     .unwrap();
//!
//! let index = exchange.calculate_all_share_index();
//! assert!(index.is_some());
//! ```

#![warn(clippy::all)]

// Modules
mod error;
mod exchange;

// Re-exports
pub use error::ExchangeError;
pub use exchange::Exchange;
