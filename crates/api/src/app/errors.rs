use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use bookshelf_core::BookId;
use bookshelf_store::StoreError;

/// 404 with the plain-text body callers match on.
pub fn book_not_found(id: BookId) -> axum::response::Response {
    (StatusCode::NOT_FOUND, format!("Book not found with id: {id}")).into_response()
}

/// 409 with the plain-text body callers match on.
pub fn title_conflict(title: &str) -> axum::response::Response {
    (
        StatusCode::CONFLICT,
        format!("Book already exists with title: {title}"),
    )
        .into_response()
}

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        // The store-level uniqueness constraint fired (e.g. a create racing
        // past the service pre-check, or an update stealing a title).
        StoreError::DuplicateTitle(title) => title_conflict(&title),
        StoreError::Unavailable(msg) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_unavailable", msg)
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
