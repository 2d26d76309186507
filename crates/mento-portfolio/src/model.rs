use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Headline totals, taken as reported by the portfolio API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    /// Wallet token holdings in USD
    pub total_tokens: f64,
    /// DeFi app positions in USD
    pub total_apps: f64,
    #[serde(rename = "totalNFTs")]
    pub total_nfts: f64,
    pub grand_total: f64,
}

impl PortfolioSummary {
    pub fn new(total_tokens: f64, total_apps: f64, total_nfts: f64) -> Self {
        Self {
            total_tokens,
            total_apps,
            total_nfts,
            grand_total: total_tokens + total_apps + total_nfts,
        }
    }
}

/// A single flattened token holding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedToken {
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub balance: f64,
    #[serde(rename = "balanceUSD")]
    pub balance_usd: f64,
    pub price: f64,
    pub address: String,
    pub network: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_type: Option<String>,
    /// Nesting depth inside an app-token tree, 0 being the position's direct children
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type")]
pub enum Position {
    #[serde(rename = "app-token", rename_all = "camelCase")]
    AppToken {
        label: String,
        #[serde(rename = "balanceUSD")]
        balance_usd: f64,
        underlying_tokens: Vec<ExtractedToken>,
    },
    #[serde(rename = "contract-position", rename_all = "camelCase")]
    ContractPosition {
        label: String,
        #[serde(rename = "balanceUSD")]
        balance_usd: f64,
        tokens: Vec<ExtractedToken>,
    },
}

impl Position {
    pub fn label(&self) -> &str {
        match self {
            Self::AppToken { label, .. } | Self::ContractPosition { label, .. } => label,
        }
    }

    pub fn tokens(&self) -> &[ExtractedToken] {
        match self {
            Self::AppToken {
                underlying_tokens, ..
            } => underlying_tokens,
            Self::ContractPosition { tokens, .. } => tokens,
        }
    }
}

/// One DeFi app the reserve holds positions in, on one network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolInfo {
    pub name: String,
    pub slug: String,
    pub category: String,
    pub network: String,
    pub chain_id: u64,
    /// Reported by the API, not recomputed from `positions`
    pub total_value: f64,
    pub positions: Vec<Position>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAggregate {
    pub total_value: f64,
    /// Protocol names in first-seen order; may repeat, see [`Self::unique_protocols`]
    pub protocols: Vec<String>,
    /// Networks without duplicates, in first-seen order
    pub networks: Vec<String>,
}

impl CategoryAggregate {
    pub(crate) fn record(&mut self, protocol: &str, network: &str, value: f64) {
        self.total_value += value;
        self.protocols.push(protocol.to_owned());
        if !self.networks.iter().any(|known| known == network) {
            self.networks.push(network.to_owned());
        }
    }

    /// Protocol names with duplicates removed, keeping first-seen order.
    pub fn unique_protocols(&self) -> Vec<String> {
        let mut unique: Vec<String> = Vec::with_capacity(self.protocols.len());
        for protocol in &self.protocols {
            if !unique.contains(protocol) {
                unique.push(protocol.clone());
            }
        }
        unique
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetaTypeBreakdown {
    pub position_count: u64,
    #[serde(rename = "balanceUSD")]
    pub balance_usd: f64,
}

/// Value held on one network, split between wallet tokens and app positions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NetworkAggregate {
    pub wallet_value: f64,
    pub app_value: f64,
    pub total_value: f64,
}

impl NetworkAggregate {
    pub(crate) fn add_wallet(&mut self, value: f64) {
        self.wallet_value += value;
        self.total_value += value;
    }

    pub(crate) fn add_app(&mut self, value: f64) {
        self.app_value += value;
        self.total_value += value;
    }
}

/// Unclaimed reward owed to the reserve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Claimable {
    pub protocol: String,
    pub symbol: String,
    pub balance: f64,
    #[serde(rename = "balanceUSD")]
    pub balance_usd: f64,
    pub network: String,
}

/// Flat, aggregate-ready view of a reserve portfolio snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservePortfolio {
    pub summary: PortfolioSummary,
    pub tokens: Vec<ExtractedToken>,
    pub protocols: Vec<ProtocolInfo>,
    pub categories: BTreeMap<String, CategoryAggregate>,
    pub meta_types: BTreeMap<String, MetaTypeBreakdown>,
    pub networks: BTreeMap<String, NetworkAggregate>,
    pub claimables: Vec<Claimable>,
}
