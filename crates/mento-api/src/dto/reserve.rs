use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use mento_portfolio::{
    CategoryBreakdown, Claimable, NetworkAggregate, ProtocolSummary, ReservePortfolio,
};
use mento_types::ReserveAddress;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The normalized portfolio as-is, stamped with the time it was built.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReserveReportDTO {
    #[serde(flatten)]
    pub portfolio: ReservePortfolio,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryBreakdownResponse {
    pub items: Vec<CategoryBreakdown>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProtocolBreakdownResponse {
    pub items: Vec<ProtocolSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClaimablesResponse {
    pub items: Vec<Claimable>,
    pub total_usd: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NetworkBreakdownResponse {
    pub networks: BTreeMap<String, NetworkAggregate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReserveTargetsResponse {
    pub addresses: Vec<ReserveAddress>,
    pub chain_ids: Vec<u64>,
}
