//! SubTrack Market Data Crate
//!
//! Fetches current exchange rates from external sources behind the
//! [`ExchangeRateProvider`] trait.
//!
//! # Core Types
//!
//! - [`ExchangeRateProvider`] - Source of rate quotes
//! - [`RateQuote`] - One published quote (`value` per `nominal` units)
//! - [`CbrProvider`] - Central Bank of Russia daily JSON feed

pub mod errors;
pub mod models;
pub mod provider;

pub use models::RateQuote;
pub use provider::cbr::CbrProvider;
pub use provider::ExchangeRateProvider;
