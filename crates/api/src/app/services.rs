use std::sync::Arc;

use bookshelf_core::{Book, BookId, Page, PageRequest};
use bookshelf_store::{BookStore, InMemoryBookStore, PostgresBookStore, StoreError};

/// Application services shared across handlers via `Extension`.
pub struct AppServices {
    pub books: BookService<Arc<dyn BookStore>>,
}

/// Select a store backend and wire the book service.
///
/// `DATABASE_URL` absent means the in-memory store; fine for dev, but
/// records vanish on restart. An unreachable database is reported to the
/// caller; `main` decides how to die.
pub async fn build_services(database_url: Option<&str>) -> Result<AppServices, StoreError> {
    let store: Arc<dyn BookStore> = match database_url {
        Some(url) => Arc::new(PostgresBookStore::connect(url).await?),
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory store (not durable)");
            Arc::new(InMemoryBookStore::new())
        }
    };

    Ok(AppServices {
        books: BookService::new(store),
    })
}

/// Business-rule layer between transport and storage.
///
/// Enforces what the store does not know about (the title-uniqueness
/// pre-check on create) and provides optional-result semantics for
/// not-found cases. Error-to-status translation stays in the handlers.
pub struct BookService<S> {
    store: S,
}

impl<S: BookStore> BookService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Paginated listing, delegated straight to the store.
    pub async fn list_books(&self, request: PageRequest) -> Result<Page<Book>, StoreError> {
        self.store.find_all(request).await
    }

    pub async fn get_book(&self, id: BookId) -> Result<Option<Book>, StoreError> {
        self.store.find_by_id(id).await
    }

    /// Create a book unless its title is already taken.
    ///
    /// `Ok(None)` signals "already exists"; the store is not mutated in that
    /// case. On success the returned book carries its assigned id.
    pub async fn create_book(&self, mut book: Book) -> Result<Option<Book>, StoreError> {
        if self.store.find_by_title(&book.title).await?.is_some() {
            return Ok(None);
        }
        book.id = None;
        let created = self.store.save(book).await?;
        Ok(Some(created))
    }

    /// Replace the book stored under `id`.
    ///
    /// `Ok(None)` signals "not found". The path id wins over any id in the
    /// payload. Title uniqueness is not re-checked here; the store's
    /// constraint rejects a duplicate-introducing update.
    pub async fn update_book(&self, id: BookId, book: Book) -> Result<Option<Book>, StoreError> {
        if self.store.find_by_id(id).await?.is_none() {
            return Ok(None);
        }
        let updated = self.store.save(book.with_id(id)).await?;
        Ok(Some(updated))
    }

    /// Delete the book stored under `id`; `false` when it does not exist.
    pub async fn delete_book(&self, id: BookId) -> Result<bool, StoreError> {
        if self.store.find_by_id(id).await?.is_none() {
            return Ok(false);
        }
        self.store.delete_by_id(id).await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> (Arc<InMemoryBookStore>, BookService<Arc<InMemoryBookStore>>) {
        let store = Arc::new(InMemoryBookStore::new());
        (store.clone(), BookService::new(store))
    }

    fn book(title: &str) -> Book {
        Book::draft(title, "Author", None, "Publisher", 2000)
    }

    #[tokio::test]
    async fn build_services_without_database_url_uses_in_memory_store() {
        let services = build_services(None).await.expect("in-memory wiring is infallible");
        let created = services
            .books
            .create_book(book("Wired"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(created.id, Some(BookId::new(1)));
    }

    #[tokio::test]
    async fn create_book_assigns_id() {
        let (_, svc) = service();
        let created = svc.create_book(book("New Book")).await.unwrap().unwrap();
        assert_eq!(created.id, Some(BookId::new(1)));
        assert_eq!(created.title, "New Book");

        let fetched = svc.get_book(created.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn create_book_ignores_client_supplied_id() {
        let (_, svc) = service();
        let created = svc
            .create_book(book("New Book").with_id(BookId::new(99)))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(created.id, Some(BookId::new(1)));
    }

    #[tokio::test]
    async fn create_book_returns_none_for_existing_title() {
        let (store, svc) = service();
        svc.create_book(book("Existing Book")).await.unwrap();

        let result = svc.create_book(book("Existing Book")).await.unwrap();
        assert!(result.is_none());
        assert_eq!(store.len(), 1, "store must not be mutated");
    }

    #[tokio::test]
    async fn update_book_pins_path_id() {
        let (_, svc) = service();
        let created = svc.create_book(book("Old Title")).await.unwrap().unwrap();
        let id = created.id.unwrap();

        // Payload claims a different id; the path id must win.
        let updated = svc
            .update_book(id, book("Updated Title").with_id(BookId::new(42)))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, Some(id));
        assert_eq!(updated.title, "Updated Title");
        assert!(svc.get_book(BookId::new(42)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_book_returns_none_when_absent() {
        let (store, svc) = service();
        let result = svc
            .update_book(BookId::new(1), book("Updated Title"))
            .await
            .unwrap();
        assert!(result.is_none());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn update_book_cannot_steal_an_existing_title() {
        let (_, svc) = service();
        svc.create_book(book("A")).await.unwrap();
        let b = svc.create_book(book("B")).await.unwrap().unwrap();

        let err = svc
            .update_book(b.id.unwrap(), book("A"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateTitle(t) if t == "A"));
    }

    #[tokio::test]
    async fn delete_book_removes_record() {
        let (store, svc) = service();
        let created = svc.create_book(book("Title")).await.unwrap().unwrap();
        let id = created.id.unwrap();

        assert!(svc.delete_book(id).await.unwrap());
        assert!(store.is_empty());
        assert!(svc.get_book(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_book_returns_false_when_absent() {
        let (store, svc) = service();
        svc.create_book(book("Title")).await.unwrap();

        assert!(!svc.delete_book(BookId::new(99)).await.unwrap());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn list_books_delegates_pagination() {
        let (_, svc) = service();
        for i in 0..3 {
            svc.create_book(book(&format!("Book {i}"))).await.unwrap();
        }

        let page = svc
            .list_books(PageRequest { page: 0, size: 2 })
            .await
            .unwrap();
        assert_eq!(page.content.len(), 2);
        assert_eq!(page.total_elements, 3);
        assert_eq!(page.total_pages, 2);
    }
}
