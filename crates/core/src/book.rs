//! The `Book` record and its identifier.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a stored book.
///
/// Assigned by the store on insert; never client-supplied on create.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(i64);

impl BookId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl core::fmt::Display for BookId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for BookId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<BookId> for i64 {
    fn from(value: BookId) -> Self {
        value.0
    }
}

impl FromStr for BookId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>()
            .map(Self)
            .map_err(|_| DomainError::invalid_id(s))
    }
}

/// A book record.
///
/// `id` is `None` until the store persists the record. `title` is unique
/// across all stored books (case-sensitive). `genre` is optional; `year`
/// defaults to 0 when the caller omits it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: Option<BookId>,
    pub title: String,
    pub genre: Option<String>,
    pub author: String,
    pub publisher: String,
    #[serde(default)]
    pub year: i32,
}

impl Book {
    /// A not-yet-persisted book (no id).
    pub fn draft(
        title: impl Into<String>,
        author: impl Into<String>,
        genre: Option<String>,
        publisher: impl Into<String>,
        year: i32,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            genre,
            author: author.into(),
            publisher: publisher.into(),
            year,
        }
    }

    /// Validate required fields (`title`, `author`, `publisher` non-blank).
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.trim().is_empty() {
            return Err(DomainError::validation("title must not be blank"));
        }
        if self.author.trim().is_empty() {
            return Err(DomainError::validation("author must not be blank"));
        }
        if self.publisher.trim().is_empty() {
            return Err(DomainError::validation("publisher must not be blank"));
        }
        Ok(())
    }

    /// Same record pinned to `id` (path id wins over any payload id).
    pub fn with_id(mut self, id: BookId) -> Self {
        self.id = Some(id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dune() -> Book {
        Book::draft("Dune", "Herbert", Some("Sci-Fi".to_string()), "Chilton", 1965)
    }

    #[test]
    fn validate_accepts_complete_book() {
        assert!(dune().validate().is_ok());
    }

    #[test]
    fn validate_rejects_blank_title() {
        let mut book = dune();
        book.title = "   ".to_string();
        match book.validate().unwrap_err() {
            DomainError::Validation(_) => {}
            other => panic!("expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_blank_author() {
        let mut book = dune();
        book.author = String::new();
        assert!(matches!(book.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn validate_rejects_blank_publisher() {
        let mut book = dune();
        book.publisher = String::new();
        assert!(matches!(book.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn with_id_overrides_payload_id() {
        let book = dune().with_id(BookId::new(7)).with_id(BookId::new(1));
        assert_eq!(book.id, Some(BookId::new(1)));
    }

    #[test]
    fn book_id_parses_from_path_segment() {
        assert_eq!("42".parse::<BookId>().unwrap(), BookId::new(42));
        assert!("abc".parse::<BookId>().is_err());
    }

    #[test]
    fn year_defaults_to_zero_when_omitted() {
        let book: Book = serde_json::from_str(
            r#"{"title":"Dune","author":"Herbert","publisher":"Chilton"}"#,
        )
        .unwrap();
        assert_eq!(book.year, 0);
        assert_eq!(book.genre, None);
        assert_eq!(book.id, None);
    }

    #[test]
    fn serializes_with_nullable_id_and_genre() {
        let json = serde_json::to_value(dune().with_id(BookId::new(1))).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["title"], "Dune");
        assert_eq!(json["genre"], "Sci-Fi");
        assert_eq!(json["year"], 1965);
    }
}
