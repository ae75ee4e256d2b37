use axum::http::Method;
use tower_http::cors::{Any, CorsLayer};

/// The JSON API is read/append only, so only GET and POST are advertised.
pub fn api_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
        .allow_origin(Any)
}
