//! Persistence boundary for book records.
//!
//! This crate defines an infrastructure-facing abstraction for storing and
//! looking up books without making any storage assumptions, plus two
//! implementations: in-memory (tests/dev) and Postgres (production).

pub mod in_memory;
pub mod postgres;
pub mod r#trait;

pub use in_memory::InMemoryBookStore;
pub use postgres::PostgresBookStore;
pub use r#trait::{BookStore, StoreError};
