mod handlers;
pub mod middleware;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::orchestrator::Orchestrator;

pub use middleware::SecurityConfig;

pub fn create_router(orchestrator: Orchestrator, security: SecurityConfig) -> Router {
    let api = Router::new()
        // Lab
        .route("/status", get(handlers::get_status))
        .route("/pipeline", get(handlers::get_pipeline))
        .route("/logs", get(handlers::get_logs))
        .route("/priority", put(handlers::set_priority))
        .route("/autonomous", put(handlers::set_autonomous))
        .route("/cycles", post(handlers::start_cycle))
        .route("/meta-analysis", post(handlers::run_meta_analysis))
        .route(
            "/credentials",
            get(handlers::check_credentials).post(handlers::select_credentials),
        )
        // Knowledge
        .route("/knowledge", get(handlers::get_knowledge))
        .route("/knowledge/export", get(handlers::export_knowledge))
        .route("/knowledge/import", post(handlers::import_knowledge))
        .route("/knowledge/reset", post(handlers::reset_knowledge))
        // Reports
        .route("/reports", get(handlers::list_reports))
        .route("/reports/{id}", get(handlers::get_report))
        .route("/reports/{id}/export", get(handlers::export_report))
        .route("/reports/{id}/code/{filename}", get(handlers::get_report_code))
        .layer(from_fn_with_state(
            security.clone(),
            middleware::auth_middleware,
        ))
        // Health stays reachable without a token
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(security.cors_layer())
        .with_state(orchestrator)
}
