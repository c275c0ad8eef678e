//! `bookshelf-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** types (no infrastructure concerns).

pub mod book;
pub mod error;
pub mod page;

pub use book::{Book, BookId};
pub use error::{DomainError, DomainResult};
pub use page::{Page, PageRequest};
