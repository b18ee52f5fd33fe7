use axum::http::{header, Method};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::shared::state::AppState;
use crate::{handlers, system};

/// All application routes, with CORS and request logging applied
pub fn configure_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    let api = Router::new()
        // A001 Ticket handlers
        .route(
            "/tickets",
            get(handlers::a001_ticket::list).post(handlers::a001_ticket::create),
        )
        .route(
            "/tickets/:id",
            get(handlers::a001_ticket::get_by_id)
                .patch(handlers::a001_ticket::update)
                .delete(handlers::a001_ticket::delete),
        )
        // A002 Comment handlers
        .route(
            "/tickets/:id/comments",
            post(handlers::a002_comment::create).get(handlers::a002_comment::list),
        )
        .route(
            "/tickets/:id/comments/:comment_id",
            axum::routing::delete(handlers::a002_comment::delete),
        )
        // D100 Ticket metrics
        .route("/metrics", get(handlers::d100_ticket_metrics::get_metrics));

    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health))
        .nest("/api/v1", api)
        .layer(middleware::from_fn(system::middleware::request_logger))
        .layer(cors)
        .with_state(state)
}
