pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;
pub mod views;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

use crate::middleware::session::{session_middleware, SessionStore};
use crate::services::{
    candidate_service::CandidateService, comment_service::CommentService,
    file_service::FileService,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub candidate_service: CandidateService,
    pub file_service: FileService,
    pub comment_service: CommentService,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            candidate_service: CandidateService::new(pool.clone()),
            file_service: FileService::new(pool.clone()),
            comment_service: CommentService::new(pool.clone()),
            sessions: SessionStore::new(),
            pool,
        }
    }
}

/// Browser UI plus JSON API. `max_upload_bytes = None` leaves request bodies
/// unbounded.
pub fn create_router(state: AppState, max_upload_bytes: Option<usize>) -> Router {
    let ui = Router::new()
        .route("/", get(routes::roster::index))
        .route("/candidates", post(routes::roster::create_candidate))
        .route("/search", get(routes::roster::search))
        .route("/candidates/:id/view", post(routes::roster::view_detail))
        .route("/back", post(routes::roster::back_to_list))
        .route("/candidates/:id/files", post(routes::detail::upload_file))
        .route("/candidates/:id/comments", post(routes::detail::add_comment))
        .layer(axum::middleware::from_fn_with_state(
            state.sessions.clone(),
            session_middleware,
        ));

    let api = Router::new()
        .route(
            "/api/candidates",
            get(routes::candidate_routes::list_candidates)
                .post(routes::candidate_routes::create_candidate),
        )
        .route(
            "/api/candidates/:id",
            get(routes::candidate_routes::get_candidate),
        )
        .route(
            "/api/candidates/:id/files",
            get(routes::candidate_routes::list_files).post(routes::candidate_routes::upload_file),
        )
        .route(
            "/api/candidates/:id/files/:file_id",
            get(routes::candidate_routes::download_file),
        )
        .route(
            "/api/candidates/:id/comments",
            get(routes::candidate_routes::list_comments)
                .post(routes::candidate_routes::add_comment),
        )
        .route("/api/openapi.json", get(routes::docs::openapi_json))
        .layer(middleware::cors::api_cors());

    let body_limit = match max_upload_bytes {
        Some(limit) => DefaultBodyLimit::max(limit),
        None => DefaultBodyLimit::disable(),
    };

    Router::new()
        .route("/health", get(routes::health::health))
        .merge(ui)
        .merge(api)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(body_limit)
}
