use axum::{Json, extract::State};
use chrono::Utc;

use crate::{
    AppState,
    dto::{
        CategoryBreakdownResponse, ClaimablesResponse, ErrorResponse, NetworkBreakdownResponse,
        ProtocolBreakdownResponse, ReserveReportDTO,
    },
    errors::ApiError,
    helpers::load_portfolio,
};

#[utoipa::path(
    get,
    path = "/reserve",
    tag = "Reserve",
    responses(
        (status = 200, description = "Normalized reserve portfolio", body = ReserveReportDTO),
        (status = 500, description = "Upstream portfolio fetch failed", body = ErrorResponse)
    )
)]
pub async fn get_reserve(State(state): State<AppState>) -> Result<Json<ReserveReportDTO>, ApiError> {
    let portfolio = load_portfolio(&state).await?;

    Ok(Json(ReserveReportDTO {
        portfolio,
        last_updated: Utc::now(),
    }))
}

#[utoipa::path(
    get,
    path = "/reserve/categories",
    tag = "Reserve",
    responses(
        (status = 200, description = "Category totals, largest first", body = CategoryBreakdownResponse),
        (status = 500, description = "Upstream portfolio fetch failed", body = ErrorResponse)
    )
)]
pub async fn get_reserve_categories(
    State(state): State<AppState>,
) -> Result<Json<CategoryBreakdownResponse>, ApiError> {
    let portfolio = load_portfolio(&state).await?;

    Ok(Json(CategoryBreakdownResponse {
        items: portfolio.category_breakdown(),
    }))
}

#[utoipa::path(
    get,
    path = "/reserve/protocols",
    tag = "Reserve",
    responses(
        (status = 200, description = "One row per protocol and network", body = ProtocolBreakdownResponse),
        (status = 500, description = "Upstream portfolio fetch failed", body = ErrorResponse)
    )
)]
pub async fn get_reserve_protocols(
    State(state): State<AppState>,
) -> Result<Json<ProtocolBreakdownResponse>, ApiError> {
    let portfolio = load_portfolio(&state).await?;

    Ok(Json(ProtocolBreakdownResponse {
        items: portfolio.protocol_breakdown(),
    }))
}

#[utoipa::path(
    get,
    path = "/reserve/claimables",
    tag = "Reserve",
    responses(
        (status = 200, description = "Unclaimed rewards and their USD total", body = ClaimablesResponse),
        (status = 500, description = "Upstream portfolio fetch failed", body = ErrorResponse)
    )
)]
pub async fn get_reserve_claimables(
    State(state): State<AppState>,
) -> Result<Json<ClaimablesResponse>, ApiError> {
    let portfolio = load_portfolio(&state).await?;
    let total_usd = portfolio.total_claimable_usd();

    Ok(Json(ClaimablesResponse {
        items: portfolio.claimables,
        total_usd,
    }))
}

#[utoipa::path(
    get,
    path = "/reserve/networks",
    tag = "Reserve",
    responses(
        (status = 200, description = "Wallet and app value per network", body = NetworkBreakdownResponse),
        (status = 500, description = "Upstream portfolio fetch failed", body = ErrorResponse)
    )
)]
pub async fn get_reserve_networks(
    State(state): State<AppState>,
) -> Result<Json<NetworkBreakdownResponse>, ApiError> {
    let portfolio = load_portfolio(&state).await?;

    Ok(Json(NetworkBreakdownResponse {
        networks: portfolio.networks,
    }))
}
