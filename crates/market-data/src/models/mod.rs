//! Provider data models

mod rate;

pub use rate::RateQuote;
