pub mod departments;
pub mod disciplines;
pub mod loads;
pub mod teachers;

use axum::{
    routing::{get, put},
    Json, Router,
};
use sea_orm::DatabaseConnection;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::openapi;

#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: health, OpenAPI document and the
/// CRUD surface for the four record entities.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route(
            "/api/departments",
            get(departments::list).post(departments::create),
        )
        .route(
            "/api/departments/:id",
            put(departments::update).delete(departments::remove),
        )
        .route("/api/teachers", get(teachers::list).post(teachers::create))
        .route(
            "/api/teachers/:id",
            get(teachers::get_by_id)
                .put(teachers::update)
                .delete(teachers::remove),
        )
        .route(
            "/api/disciplines",
            get(disciplines::list).post(disciplines::create),
        )
        .route(
            "/api/disciplines/:id",
            get(disciplines::get_by_id)
                .put(disciplines::update)
                .delete(disciplines::remove),
        )
        .route(
            "/api/disciplines/head/lastname/:head_last_name",
            get(disciplines::by_head_last_name),
        )
        .route("/api/loads", get(loads::list).post(loads::create))
        .route("/api/loads/:id", put(loads::update).delete(loads::remove));

    Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi::serve))
        .merge(api)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
