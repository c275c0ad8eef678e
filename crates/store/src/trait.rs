use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use bookshelf_core::{Book, BookId, Page, PageRequest};

/// Store operation error.
///
/// These are **infrastructure errors** (backing medium unreachable) plus the
/// one business rule pushed down into the store as defense-in-depth: the
/// uniqueness constraint on `title`. Expected not-found conditions are not
/// errors at this layer; lookups return `Option`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The title-uniqueness constraint rejected a write.
    #[error("a book with title '{0}' is already stored")]
    DuplicateTitle(String),

    /// The backing medium could not be read or written.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}

/// Persistence abstraction holding book records.
///
/// ## Contract
///
/// - `save` inserts when `book.id` is `None`, assigning a new unique id;
///   otherwise it overwrites the record matching `book.id`. Presence of the
///   target record is the caller's responsibility, as it is for
///   `delete_by_id` (a no-op when the id is absent).
/// - `find_all` returns records in primary-key order, bounded to the
///   requested page size, together with the total record count.
/// - Implementations must enforce title uniqueness on write and report a
///   violation as [`StoreError::DuplicateTitle`]. This closes the
///   check-then-act window left open by the service-level pre-check under
///   concurrent writers.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Look up a book by id.
    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, StoreError>;

    /// Look up a book by exact (case-sensitive) title.
    async fn find_by_title(&self, title: &str) -> Result<Option<Book>, StoreError>;

    /// List books in id order, one page at a time.
    async fn find_all(&self, request: PageRequest) -> Result<Page<Book>, StoreError>;

    /// Insert (`id: None`) or overwrite (`id: Some`) a record.
    ///
    /// Returns the persisted book, carrying its assigned id.
    async fn save(&self, book: Book) -> Result<Book, StoreError>;

    /// Remove the record with `id`; no-op when absent.
    async fn delete_by_id(&self, id: BookId) -> Result<(), StoreError>;
}

#[async_trait]
impl<S> BookStore for Arc<S>
where
    S: BookStore + ?Sized,
{
    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, StoreError> {
        (**self).find_by_id(id).await
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Book>, StoreError> {
        (**self).find_by_title(title).await
    }

    async fn find_all(&self, request: PageRequest) -> Result<Page<Book>, StoreError> {
        (**self).find_all(request).await
    }

    async fn save(&self, book: Book) -> Result<Book, StoreError> {
        (**self).save(book).await
    }

    async fn delete_by_id(&self, id: BookId) -> Result<(), StoreError> {
        (**self).delete_by_id(id).await
    }
}
