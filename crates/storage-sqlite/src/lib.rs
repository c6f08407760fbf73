//! SQLite storage implementation for SubTrack.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `subtrack-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for subscriptions and exchange rates
//! - Database-specific model types (with Diesel derives)
//!
//! This crate is the only place in the application where Diesel dependencies exist.

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod fx;
pub mod subscriptions;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use fx::FxRepository;
pub use subscriptions::SubscriptionRepository;

// Re-export from subtrack-core for convenience
pub use subtrack_core::errors::{DatabaseError, Error, Result};
