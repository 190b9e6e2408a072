//! Exchange layer errors

use gbce_domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the exchange layer
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// Duplicate listing of a symbol
    #[error("Stock already listed: {symbol}")]
    AlreadyListed {
        /// Normalized symbol of the existing listing
        symbol: String,
    },

    /// Operation against a symbol with no listing
    #[error("Unknown symbol: {symbol}")]
    UnknownSymbol {
        /// Normalized symbol that was looked up
        symbol: String,
    },

    /// Domain error passthrough
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}

impl ExchangeError {
    /// Create an already-listed error
    pub fn already_listed(symbol: impl Into<String>) -> Self {
        Self::AlreadyListed {
            symbol: symbol.into(),
        }
    }

    /// Create an unknown-symbol error
    pub fn unknown_symbol(symbol: impl Into<String>) -> Self {
        Self::UnknownSymbol {
            symbol: symbol.into(),
        }
    }
}
