//! FX (Foreign Exchange) module - currencies, rate cache, conversion and the
//! refresh service.

pub mod currency;
pub mod currency_converter;
mod fx_errors;
mod fx_model;
mod fx_service;
mod fx_traits;
pub mod rate_cache;


pub use currency::{format_amount, Currency};
pub use currency_converter::{convert_to_reporting_currency, CurrencyConverter};
pub use fx_errors::FxError;
pub use fx_model::ExchangeRate;
pub use fx_service::FxService;
pub use fx_traits::{FxRepositoryTrait, FxServiceTrait};
pub use rate_cache::{is_stale, is_stale_at, RateCache};
