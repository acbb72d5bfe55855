//! # Journal Database Crate
//!
//! A read-only, application-specific interface to the SQLite trade journal.
//! The journal is populated elsewhere (the logging bot); this crate only ever
//! reads from it.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** Encapsulates all SQL and row-mapping logic and exposes
//!   typed `Trade` records to the rest of the system.
//! - **Explicit lifecycle:** The pool is constructed by `connect`, injected
//!   into `JournalRepository::new`, and torn down with `close`. There is no
//!   module-level singleton connection.
//! - **Asynchronous & pooled:** All operations are async over a `SqlitePool`.
//!
//! ## Public API
//!
//! - `connect` / `close`: the pool lifecycle.
//! - `JournalRepository`: the high-level data-access methods.
//! - `DbError`: the specific error types returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{close, connect};
pub use error::DbError;
pub use repository::JournalRepository;
