use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use bookshelf_core::BookId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_book).get(list_books))
        .route("/:id", get(get_book).put(update_book).delete(delete_book))
}

pub async fn list_books(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<dto::PageParams>,
) -> axum::response::Response {
    match services.books.list_books(params.into()).await {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_book(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
) -> axum::response::Response {
    let id = BookId::new(id);
    match services.books.get_book(id).await {
        Ok(Some(book)) => (StatusCode::OK, Json(book)).into_response(),
        Ok(None) => errors::book_not_found(id),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn create_book(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::BookPayload>,
) -> axum::response::Response {
    let book = match body.into_book() {
        Ok(b) => b,
        Err(resp) => return resp,
    };
    let title = book.title.clone();

    match services.books.create_book(book).await {
        Ok(Some(created)) => (StatusCode::CREATED, Json(created)).into_response(),
        Ok(None) => errors::title_conflict(&title),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn update_book(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
    Json(body): Json<dto::BookPayload>,
) -> axum::response::Response {
    let book = match body.into_book() {
        Ok(b) => b,
        Err(resp) => return resp,
    };
    let id = BookId::new(id);

    match services.books.update_book(id, book).await {
        Ok(Some(updated)) => (StatusCode::OK, Json(updated)).into_response(),
        Ok(None) => errors::book_not_found(id),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn delete_book(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
) -> axum::response::Response {
    let id = BookId::new(id);
    match services.books.delete_book(id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => errors::book_not_found(id),
        Err(e) => errors::store_error_to_response(e),
    }
}
