use std::collections::BTreeMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;

use bookshelf_core::{Book, BookId, Page, PageRequest};

use super::r#trait::{BookStore, StoreError};

/// In-memory book store.
///
/// Intended for tests/dev. Records live in a `BTreeMap` keyed by id, so
/// iteration order is primary-key order, matching the Postgres backend.
#[derive(Debug, Default)]
pub struct InMemoryBookStore {
    books: RwLock<BTreeMap<i64, Book>>,
    next_id: AtomicI64,
}

impl InMemoryBookStore {
    pub fn new() -> Self {
        Self {
            books: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of stored records (test helper).
    pub fn len(&self) -> usize {
        self.books.read().map(|b| b.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl BookStore for InMemoryBookStore {
    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, StoreError> {
        let books = self
            .books
            .read()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;
        Ok(books.get(&id.as_i64()).cloned())
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Book>, StoreError> {
        let books = self
            .books
            .read()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;
        Ok(books.values().find(|b| b.title == title).cloned())
    }

    async fn find_all(&self, request: PageRequest) -> Result<Page<Book>, StoreError> {
        let books = self
            .books
            .read()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;
        let content = books
            .values()
            .skip(request.offset() as usize)
            .take(request.size as usize)
            .cloned()
            .collect();
        Ok(Page::new(content, books.len() as u64, request))
    }

    async fn save(&self, mut book: Book) -> Result<Book, StoreError> {
        let mut books = self
            .books
            .write()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;

        let id = match book.id {
            Some(id) => id.as_i64(),
            None => self.next_id.fetch_add(1, Ordering::SeqCst),
        };

        // Title uniqueness against every other record, mirroring the
        // UNIQUE constraint the Postgres backend carries.
        if books
            .iter()
            .any(|(other_id, other)| *other_id != id && other.title == book.title)
        {
            return Err(StoreError::DuplicateTitle(book.title));
        }

        book.id = Some(BookId::new(id));
        books.insert(id, book.clone());
        Ok(book)
    }

    async fn delete_by_id(&self, id: BookId) -> Result<(), StoreError> {
        let mut books = self
            .books
            .write()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;
        books.remove(&id.as_i64());
        Ok(())
    }
}
