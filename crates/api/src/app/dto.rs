use axum::http::StatusCode;
use serde::Deserialize;

use bookshelf_core::{Book, PageRequest};

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

/// Body of `POST /api/books` and `PUT /api/books/{id}`.
///
/// `title`, `author` and `publisher` are required; `genre` and `year` are
/// optional (`year` defaults to 0, matching the stored default).
#[derive(Debug, Deserialize)]
pub struct BookPayload {
    pub title: String,
    pub author: String,
    pub genre: Option<String>,
    pub publisher: String,
    #[serde(default)]
    pub year: i32,
}

impl BookPayload {
    /// Validate required fields and convert into a domain `Book` (no id).
    ///
    /// Runs before any service call; a blank required field yields a 400.
    pub fn into_book(self) -> Result<Book, axum::response::Response> {
        let book = Book::draft(self.title, self.author, self.genre, self.publisher, self.year);
        book.validate().map_err(|e| {
            errors::json_error(StatusCode::BAD_REQUEST, "validation_failed", e.to_string())
        })?;
        Ok(book)
    }
}

/// Query string of `GET /api/books`.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
}

impl From<PageParams> for PageRequest {
    fn from(params: PageParams) -> Self {
        PageRequest::new(params.page, params.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_with_blank_title_is_rejected() {
        let payload = BookPayload {
            title: "  ".to_string(),
            author: "Author".to_string(),
            genre: None,
            publisher: "Publisher".to_string(),
            year: 0,
        };
        assert!(payload.into_book().is_err());
    }

    #[test]
    fn missing_optional_fields_deserialize() {
        let payload: BookPayload =
            serde_json::from_str(r#"{"title":"T","author":"A","publisher":"P"}"#).unwrap();
        let book = payload.into_book().unwrap();
        assert_eq!(book.year, 0);
        assert_eq!(book.genre, None);
        assert_eq!(book.id, None);
    }

    #[test]
    fn page_params_map_to_clamped_request() {
        let request: PageRequest = PageParams {
            page: Some(-1),
            size: Some(0),
        }
        .into();
        assert_eq!(request, PageRequest { page: 0, size: 1 });

        let request: PageRequest = PageParams::default().into();
        assert_eq!(request, PageRequest { page: 0, size: 10 });
    }
}
