//! Postgres-backed book store.
//!
//! Persists books in a single `books` table with a `BIGSERIAL` primary key
//! and a `UNIQUE` constraint on `title`. The constraint is the authoritative
//! uniqueness check: a violation on insert or update is reported as
//! [`StoreError::DuplicateTitle`], so a write racing past the service-level
//! pre-check still cannot produce a duplicate.
//!
//! ## Error mapping
//!
//! SQLx errors are mapped to `StoreError` as follows:
//!
//! | SQLx error | Postgres code | StoreError |
//! |---|---|---|
//! | Database (unique violation) | `23505` | `DuplicateTitle` |
//! | Database (other) | any | `Unavailable` |
//! | PoolClosed / Io / other | n/a | `Unavailable` |

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;

use bookshelf_core::{Book, BookId, Page, PageRequest};

use super::r#trait::{BookStore, StoreError};

/// Postgres-backed book store.
///
/// Cloneable; all operations go through the SQLx connection pool, which is
/// `Send + Sync` and handles connection management.
#[derive(Debug, Clone)]
pub struct PostgresBookStore {
    pool: Arc<PgPool>,
}

impl PostgresBookStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Connect to `url` and bootstrap the schema.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let pool = PgPool::connect(url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        let store = Self::new(pool);
        store.ensure_schema().await?;
        Ok(store)
    }

    /// Create the `books` table and its title-uniqueness constraint if absent.
    #[instrument(skip(self), err)]
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS books (
                id        BIGSERIAL PRIMARY KEY,
                title     TEXT NOT NULL UNIQUE,
                genre     TEXT,
                author    TEXT NOT NULL,
                publisher TEXT NOT NULL,
                year      INTEGER NOT NULL DEFAULT 0
            )
            "#,
        )
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        Ok(())
    }
}

#[async_trait]
impl BookStore for PostgresBookStore {
    #[instrument(skip(self), fields(id = %id), err)]
    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, title, genre, author, publisher, year
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_by_id", e))?;

        row.as_ref().map(book_from_row).transpose()
    }

    #[instrument(skip(self, title), err)]
    async fn find_by_title(&self, title: &str) -> Result<Option<Book>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, title, genre, author, publisher, year
            FROM books
            WHERE title = $1
            "#,
        )
        .bind(title)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_by_title", e))?;

        row.as_ref().map(book_from_row).transpose()
    }

    #[instrument(skip(self), fields(page = request.page, size = request.size), err)]
    async fn find_all(&self, request: PageRequest) -> Result<Page<Book>, StoreError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("count", e))?;

        let rows = sqlx::query(
            r#"
            SELECT id, title, genre, author, publisher, year
            FROM books
            ORDER BY id ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(i64::from(request.size))
        .bind(request.offset() as i64)
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_all", e))?;

        let content = rows
            .iter()
            .map(book_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(content, total as u64, request))
    }

    #[instrument(skip(self, book), fields(id = ?book.id, title = %book.title), err)]
    async fn save(&self, book: Book) -> Result<Book, StoreError> {
        match book.id {
            None => {
                let id: i64 = sqlx::query_scalar(
                    r#"
                    INSERT INTO books (title, genre, author, publisher, year)
                    VALUES ($1, $2, $3, $4, $5)
                    RETURNING id
                    "#,
                )
                .bind(&book.title)
                .bind(&book.genre)
                .bind(&book.author)
                .bind(&book.publisher)
                .bind(book.year)
                .fetch_one(&*self.pool)
                .await
                .map_err(|e| {
                    if is_unique_violation(&e) {
                        StoreError::DuplicateTitle(book.title.clone())
                    } else {
                        map_sqlx_error("insert_book", e)
                    }
                })?;

                Ok(book.with_id(BookId::new(id)))
            }
            Some(id) => {
                sqlx::query(
                    r#"
                    UPDATE books
                    SET title = $2, genre = $3, author = $4, publisher = $5, year = $6
                    WHERE id = $1
                    "#,
                )
                .bind(id.as_i64())
                .bind(&book.title)
                .bind(&book.genre)
                .bind(&book.author)
                .bind(&book.publisher)
                .bind(book.year)
                .execute(&*self.pool)
                .await
                .map_err(|e| {
                    if is_unique_violation(&e) {
                        StoreError::DuplicateTitle(book.title.clone())
                    } else {
                        map_sqlx_error("update_book", e)
                    }
                })?;

                Ok(book)
            }
        }
    }

    #[instrument(skip(self), fields(id = %id), err)]
    async fn delete_by_id(&self, id: BookId) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id.as_i64())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_by_id", e))?;
        Ok(())
    }
}

fn book_from_row(row: &PgRow) -> Result<Book, StoreError> {
    let read = |e: sqlx::Error| StoreError::unavailable(format!("failed to read book row: {e}"));
    Ok(Book {
        id: Some(BookId::new(row.try_get("id").map_err(read)?)),
        title: row.try_get("title").map_err(read)?,
        genre: row.try_get("genre").map_err(read)?,
        author: row.try_get("author").map_err(read)?,
        publisher: row.try_get("publisher").map_err(read)?,
        year: row.try_get("year").map_err(read)?,
    })
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => StoreError::unavailable(format!(
            "database error in {}: {}",
            operation,
            db_err.message()
        )),
        sqlx::Error::PoolClosed => {
            StoreError::unavailable(format!("connection pool closed in {operation}"))
        }
        other => StoreError::unavailable(format!("sqlx error in {operation}: {other}")),
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db_err) = err {
        if let Some(code) = db_err.code() {
            return code.as_ref() == "23505";
        }
    }
    false
}
