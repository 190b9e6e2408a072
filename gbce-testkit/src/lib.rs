//! Test helpers for GBCE exchange tests.
//!
//! Provides the canonical sample listings and scripted-trade builders with
//! explicit instants, so window behavior can be asserted without sleeping.

mod helpers;

pub use helpers::{minutes_before, sample_exchange, sample_listings, with_trades_at};
