use axum::{Json, extract::State};

use crate::{AppState, dto::ReserveTargetsResponse};

#[utoipa::path(
    get,
    path = "/reserve/targets",
    tag = "Reserve",
    responses(
        (status = 200, description = "Reserve addresses and chains being tracked", body = ReserveTargetsResponse)
    )
)]
pub async fn get_reserve_targets(State(state): State<AppState>) -> Json<ReserveTargetsResponse> {
    Json(ReserveTargetsResponse {
        addresses: state.targets.addresses.clone(),
        chain_ids: state.targets.chain_ids(),
    })
}
