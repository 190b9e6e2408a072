//! GBCE Domain Layer
//!
//! Pure domain logic for the Global Beverage Corporation Exchange:
//! zero I/O dependencies, entities, value objects, and the per-stock
//! metric calculations.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Public modules
pub mod entities;
pub mod value_objects;

// Re-export commonly used types
pub use entities::{Stock, Trade, TradeId, DEFAULT_VWAP_WINDOW_MINUTES};
pub use value_objects::{DomainError, OrderSide, Price, Quantity, StockClass, Symbol};
