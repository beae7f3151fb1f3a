use axum::{http::Method, Router};
use std::path::Path;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

pub mod bookings;
pub mod error;
pub mod extract;
pub mod flights;
pub mod health;
pub mod middleware;
pub mod session_store;
pub mod sessions;
pub mod state;
pub mod worker;

pub use session_store::{SessionSnapshot, SessionStore};
pub use state::AppState;

/// JSON API under `/api`, the front end for everything else.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::USER_AGENT,
        ]);

    let api = Router::new()
        .merge(health::routes())
        .merge(flights::routes())
        .merge(sessions::routes())
        .merge(bookings::routes())
        .fallback(api_not_found);

    let static_dir = Path::new(&state.config.static_files.dir);
    let index = static_dir.join(&state.config.static_files.index);
    let front_end = Router::new()
        .fallback_service(ServeDir::new(static_dir).fallback(ServeFile::new(index)))
        .layer(axum::middleware::from_fn(middleware::no_cache));

    Router::new()
        .nest("/api", api)
        .merge(front_end)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn api_not_found() -> error::AppError {
    error::AppError::NotFoundError("No such API route".to_string())
}
