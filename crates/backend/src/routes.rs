use axum::http::{header, Method};
use axum::middleware;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::state::AppState;
use crate::system;

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // USER AUTH ROUTES (PUBLIC)
        // ========================================
        .route("/api/user/login", post(system::handlers::user::login))
        // Protected
        .route(
            "/api/user/Admin",
            get(system::handlers::user::admin).layer(middleware::from_fn_with_state(
                state.clone(),
                system::auth::middleware::require_auth,
            )),
        )
        .layer(middleware::from_fn(
            system::middleware::request_logger::request_logger,
        ))
        .layer(cors)
        .with_state(state)
}
