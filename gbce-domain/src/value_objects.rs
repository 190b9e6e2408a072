//! Value Objects for the GBCE domain
//!
//! Immutable, validated domain primitives.
//! All value objects enforce invariants at construction time.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Domain errors for value object and calculation validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Price must be positive
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    /// Quantity must be a positive integer
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    /// Symbol must be non-blank
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// Dividend values must be non-negative
    #[error("Invalid dividend: {0}")]
    InvalidDividend(String),

    /// Aggregation window must be positive
    #[error("Invalid window: {0}")]
    InvalidWindow(String),
}

// =============================================================================
// Price
// =============================================================================

/// Price represents a positive decimal price in minor currency units (pence)
///
/// # Invariants
/// - Must be > 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Price(Decimal);

impl Price {
    /// Create a new Price with validation
    ///
    /// # Errors
    /// Returns `DomainError::InvalidPrice` if value <= 0
    pub fn new(value: Decimal) -> Result<Self, DomainError> {
        if value <= Decimal::ZERO {
            return Err(DomainError::InvalidPrice(
                "price must be a positive number".to_string(),
            ));
        }
        Ok(Self(value))
    }

    /// Get the underlying Decimal value
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Quantity
// =============================================================================

/// Quantity represents a positive whole number of shares
///
/// # Invariants
/// - Must be > 0
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Quantity(u64);

impl Quantity {
    /// Create a new Quantity with validation
    ///
    /// # Errors
    /// Returns `DomainError::InvalidQuantity` if value is zero
    pub fn new(value: u64) -> Result<Self, DomainError> {
        if value == 0 {
            return Err(DomainError::InvalidQuantity(
                "quantity must be a positive integer".to_string(),
            ));
        }
        Ok(Self(value))
    }

    /// Get the underlying share count
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Get the share count as a Decimal, for volume weighting
    pub fn as_decimal(&self) -> Decimal {
        Decimal::from(self.0)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Symbol
// =============================================================================

/// Symbol is the normalized ticker identity of a listed stock (e.g., POP)
///
/// # Invariants
/// - Trimmed and upper-cased at construction
/// - Must be non-blank
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(String);

impl Symbol {
    /// Create a Symbol, normalizing the raw ticker (trim + upper-case)
    ///
    /// # Examples
    /// ```
    /// # use gbce_domain::value_objects::Symbol;
    /// let symbol = Symbol::new("  pop ").unwrap();
    /// assert_eq!(symbol.as_str(), "POP");
    /// ```
    ///
    /// # Errors
    /// Returns `DomainError::InvalidSymbol` if the ticker is blank
    pub fn new(raw: &str) -> Result<Self, DomainError> {
        let normalized = raw.trim().to_uppercase();
        if normalized.is_empty() {
            return Err(DomainError::InvalidSymbol(
                "symbol must be non-blank".to_string(),
            ));
        }
        Ok(Self(normalized))
    }

    /// Get the normalized ticker
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// OrderSide
// =============================================================================

/// OrderSide represents the direction of an executed order
///
/// Recorded on every trade; intentionally consulted by no metric
/// (volume weighting and the index are side-agnostic).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderSide {
    /// Buy order
    Buy,
    /// Sell order
    Sell,
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderSide::Buy => write!(f, "BUY"),
            OrderSide::Sell => write!(f, "SELL"),
        }
    }
}

// =============================================================================
// StockClass
// =============================================================================

/// StockClass represents the valuation class of a listed stock
///
/// The preferred dividend rate lives on the variant, so a preferred stock
/// without a fixed dividend is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockClass {
    /// Common stock; yield derives from the last dividend
    Common,
    /// Preferred stock; yield derives from the contractual dividend rate
    Preferred {
        /// Fixed dividend as a fraction of par value (0.02 = 2%)
        fixed_dividend: Decimal,
    },
}

impl StockClass {
    /// Get the name of the class for display
    pub fn name(&self) -> &str {
        match self {
            StockClass::Common => "common",
            StockClass::Preferred { .. } => "preferred",
        }
    }

    /// Check whether this is the preferred class
    pub fn is_preferred(&self) -> bool {
        matches!(self, StockClass::Preferred { .. })
    }
}

// =============================================================================
// Tests
// =============================================================================
