use axum::Router;

pub mod books;
pub mod system;

/// Router for all resource endpoints.
pub fn router() -> Router {
    Router::new().nest("/api/books", books::router())
}
