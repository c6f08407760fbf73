//! SubTrack Core - Domain entities, services, and traits.
//!
//! This crate contains the billing engine and subscription logic for SubTrack.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod billing;
pub mod constants;
pub mod errors;
pub mod fx;
pub mod subscriptions;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
