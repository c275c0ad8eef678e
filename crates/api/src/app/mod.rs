//! HTTP API application wiring (Axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: store selection and the book service (business rules)
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// `database_url: None` selects the in-memory store (dev/tests). Fails only
/// when the configured database is unreachable.
pub async fn build_app(database_url: Option<&str>) -> Result<Router, bookshelf_store::StoreError> {
    let services = Arc::new(services::build_services(database_url).await?);

    Ok(Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router().layer(Extension(services))))
}
