use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::ReservePortfolio;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub category: String,
    pub total_value: f64,
    /// Share of the total app positions value, in percent
    pub share_pct: f64,
    pub protocols: Vec<String>,
    pub networks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolSummary {
    pub name: String,
    pub category: String,
    pub network: String,
    pub total_value: f64,
    pub position_count: usize,
}

fn share_pct(value: f64, total: f64) -> f64 {
    if total.abs() > f64::EPSILON {
        (value / total) * 100.0
    } else {
        0.0
    }
}

impl ReservePortfolio {
    /// Categories ordered by value, largest first, with protocol names
    /// deduplicated.
    pub fn category_breakdown(&self) -> Vec<CategoryBreakdown> {
        let mut breakdown: Vec<CategoryBreakdown> = self
            .categories
            .iter()
            .map(|(category, aggregate)| CategoryBreakdown {
                category: category.clone(),
                total_value: aggregate.total_value,
                share_pct: share_pct(aggregate.total_value, self.summary.total_apps),
                protocols: aggregate.unique_protocols(),
                networks: aggregate.networks.clone(),
            })
            .collect();

        // stable sort keeps alphabetical order between equal values
        breakdown.sort_by(|a, b| b.total_value.total_cmp(&a.total_value));
        breakdown
    }

    pub fn protocol_breakdown(&self) -> Vec<ProtocolSummary> {
        self.protocols
            .iter()
            .map(|protocol| ProtocolSummary {
                name: protocol.name.clone(),
                category: protocol.category.clone(),
                network: protocol.network.clone(),
                total_value: protocol.total_value,
                position_count: protocol.positions.len(),
            })
            .collect()
    }

    pub fn total_claimable_usd(&self) -> f64 {
        self.claimables.iter().map(|c| c.balance_usd).sum()
    }
}
