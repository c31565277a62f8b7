//! SQLite storage implementation for rentcalc.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the report store trait defined in `rentcalc-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - The report repository and its database model types
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! `core` is database-agnostic and works with traits.
//!
//! ```text
//!          core (deals, reports)
//!                  │
//!                  ▼
//!          storage-sqlite (this crate)
//!                  │
//!                  ▼
//!              SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod reports;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from rentcalc-core for convenience
pub use rentcalc_core::errors::{DatabaseError, Error, Result};
