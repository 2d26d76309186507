use axum::Router;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;

use utoipa::OpenApi as OpenApiT;
use utoipa_swagger_ui::SwaggerUi;

use crate::{AppState, errors::ApiError, handlers};

/// Path the dashboard fetches the full report from.
pub const LEGACY_RESERVE_PATH: &str = "/api/mentoReserve";

pub fn api_router<T: OpenApiT>(_state: AppState) -> Router<AppState> {
    let open_api = T::openapi();

    let reserve_router = Router::new()
        .route("/", get(handlers::get_reserve))
        .route("/categories", get(handlers::get_reserve_categories))
        .route("/protocols", get(handlers::get_reserve_protocols))
        .route("/claimables", get(handlers::get_reserve_claimables))
        .route("/networks", get(handlers::get_reserve_networks))
        .route("/targets", get(handlers::get_reserve_targets));

    Router::new()
        .route("/health", get(health))
        .route(LEGACY_RESERVE_PATH, get(handlers::get_reserve))
        .nest("/v1/reserve", reserve_router)
        .merge(SwaggerUi::new("/v1/docs").url("/v1/docs/openapi.json", open_api))
        .fallback(handler_404)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn handler_404() -> impl IntoResponse {
    ApiError::NotFound("The requested resource was not found".to_string())
}
