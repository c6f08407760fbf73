//! Exchange-rate provider abstractions and implementations.

mod traits;

pub mod cbr;

pub use traits::ExchangeRateProvider;
