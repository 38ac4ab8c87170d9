pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue},
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    services::{ServeDir, ServeFile},
    set_header::SetResponseHeaderLayer,
};

use crate::screening::handlers;
use crate::state::AppState;

/// Where the browser downloads the latest report from.
pub const REPORT_ROUTE: &str = "/screening_report.pdf";

pub fn build_router(state: AppState) -> Router {
    // The report is replaced on every run; never let a browser reuse an old copy.
    let report = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .service(ServeFile::new(&state.config.report_path));

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/screen", post(handlers::handle_screen))
        .route_service(REPORT_ROUTE, report)
        // Browser assets (index.html, script.js, style.css)
        .fallback_service(ServeDir::new(&state.config.public_dir))
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .with_state(state)
}
