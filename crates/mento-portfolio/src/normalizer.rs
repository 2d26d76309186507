use mento_types::{
    AppBalance, AppTokenPosition, ContractPosition, PortfolioData, PortfolioV2, PositionBalance,
    TokenNode, nodes_of,
};

use crate::{
    categorize::{Categorizer, ProtocolCategorizer},
    error::NormalizeError,
    extract::{extract_contract_tokens, extract_underlying_tokens, is_claimable},
    model::{
        Claimable, ExtractedToken, MetaTypeBreakdown, PortfolioSummary, Position, ProtocolInfo,
        ReservePortfolio,
    },
};

pub const WALLET_PROTOCOL: &str = "Wallet Holdings";
pub const WALLET_CATEGORY: &str = "Wallet";
const DEFAULT_CONTRACT_LABEL: &str = "Position";

/// Turns a raw portfolio snapshot into a [`ReservePortfolio`].
///
/// Normalization is a single synchronous pass over borrowed input, so the
/// same snapshot always yields the same result.
#[derive(Debug, Clone, Default)]
pub struct Normalizer<C = ProtocolCategorizer> {
    categorizer: C,
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Categorizer> Normalizer<C> {
    pub const fn with_categorizer(categorizer: C) -> Self {
        Self { categorizer }
    }

    pub fn normalize(&self, data: &PortfolioData) -> Result<ReservePortfolio, NormalizeError> {
        let portfolio = data
            .portfolio_v2
            .as_ref()
            .ok_or(NormalizeError::MissingPortfolio)?;

        let mut result = ReservePortfolio {
            summary: summary(portfolio),
            ..Default::default()
        };

        let token_balances = portfolio.token_balances.as_ref();
        for token in nodes_of(token_balances.and_then(|t| t.by_token.as_ref())) {
            result
                .networks
                .entry(token.network.name.clone())
                .or_default()
                .add_wallet(token.balance_usd);
            result.tokens.push(wallet_token(token));
        }

        let app_balances = portfolio.app_balances.as_ref();
        for app_balance in nodes_of(app_balances.and_then(|a| a.by_app.as_ref())) {
            self.fold_app(app_balance, &mut result);
        }

        for meta in nodes_of(app_balances.and_then(|a| a.by_meta_type.as_ref())) {
            result.meta_types.insert(
                meta.meta_type.clone(),
                MetaTypeBreakdown {
                    position_count: meta.position_count,
                    balance_usd: meta.balance_usd,
                },
            );
        }

        tracing::debug!(
            tokens = result.tokens.len(),
            protocols = result.protocols.len(),
            categories = result.categories.len(),
            claimables = result.claimables.len(),
            grand_total = result.summary.grand_total,
            "normalized reserve portfolio",
        );

        Ok(result)
    }

    fn fold_app(&self, app_balance: &AppBalance, result: &mut ReservePortfolio) {
        let app = &app_balance.app;
        let network = &app_balance.network;
        let category = self
            .categorizer
            .categorize(&app.slug, app.category_name());

        let mut protocol = ProtocolInfo {
            name: app.display_name.clone(),
            slug: app.slug.clone(),
            category: category.clone(),
            network: network.name.clone(),
            chain_id: network.chain_id,
            total_value: app_balance.balance_usd,
            positions: Vec::new(),
        };

        for position in nodes_of(app_balance.position_balances.as_ref()) {
            match position {
                PositionBalance::AppToken(position) => {
                    if let Some(position) = app_token_position(position) {
                        protocol.positions.push(position);
                    }
                }
                PositionBalance::ContractPosition(position) => {
                    let Some(position) = contract_position(position) else {
                        continue;
                    };
                    result.claimables.extend(
                        position
                            .tokens()
                            .iter()
                            .filter(|token| is_claimable(token))
                            .map(|token| Claimable {
                                protocol: app.display_name.clone(),
                                symbol: token.symbol.clone(),
                                balance: token.balance,
                                balance_usd: token.balance_usd,
                                network: network.name.clone(),
                            }),
                    );
                    protocol.positions.push(position);
                }
                PositionBalance::Unknown => {
                    tracing::trace!(app = %app.slug, "skipping position of unknown type");
                }
            }
        }

        result.protocols.push(protocol);

        result
            .categories
            .entry(category)
            .or_default()
            .record(&app.display_name, &network.name, app_balance.balance_usd);
        result
            .networks
            .entry(network.name.clone())
            .or_default()
            .add_app(app_balance.balance_usd);
    }
}

fn summary(portfolio: &PortfolioV2) -> PortfolioSummary {
    PortfolioSummary::new(
        portfolio
            .token_balances
            .as_ref()
            .map_or(0.0, |t| t.total_balance_usd),
        portfolio
            .app_balances
            .as_ref()
            .map_or(0.0, |a| a.total_balance_usd),
        portfolio
            .nft_balances
            .as_ref()
            .map_or(0.0, |n| n.total_balance_usd),
    )
}

fn wallet_token(token: &TokenNode) -> ExtractedToken {
    ExtractedToken {
        symbol: token.symbol.clone(),
        name: token.name.clone(),
        balance: token.balance,
        balance_usd: token.balance_usd,
        price: token.price,
        address: token.token_address.clone(),
        network: token.network.name.clone(),
        protocol: Some(WALLET_PROTOCOL.to_owned()),
        category: Some(WALLET_CATEGORY.to_owned()),
        ..Default::default()
    }
}

/// Positions without token legs carry nothing to flatten and are skipped.
fn app_token_position(position: &AppTokenPosition) -> Option<Position> {
    if position.tokens.is_empty() {
        return None;
    }

    let label = position
        .group_label
        .clone()
        .filter(|label| !label.is_empty())
        .unwrap_or_else(|| position.symbol.clone());

    Some(Position::AppToken {
        label,
        balance_usd: position.balance_usd,
        underlying_tokens: extract_underlying_tokens(&position.tokens, 0),
    })
}

fn contract_position(position: &ContractPosition) -> Option<Position> {
    if position.tokens.is_empty() {
        return None;
    }

    let label = position
        .display_props
        .as_ref()
        .and_then(|props| props.label.clone())
        .filter(|label| !label.is_empty())
        .unwrap_or_else(|| DEFAULT_CONTRACT_LABEL.to_owned());

    Some(Position::ContractPosition {
        label,
        balance_usd: position.balance_usd,
        tokens: extract_contract_tokens(&position.tokens),
    })
}

/// Normalizes with the default protocol categorization.
pub fn normalize(data: &PortfolioData) -> Result<ReservePortfolio, NormalizeError> {
    Normalizer::new().normalize(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn portfolio(value: Value) -> PortfolioData {
        serde_json::from_value(json!({ "portfolioV2": value })).unwrap()
    }

    fn aave_app() -> Value {
        json!({
            "balanceUSD": 1000.0,
            "app": {
                "displayName": "Aave V3",
                "slug": "aave-v3",
                "category": { "name": "Lending" }
            },
            "network": { "name": "ETHEREUM", "chainId": 1 },
            "positionBalances": { "edges": [{ "node": {
                "type": "app-token",
                "symbol": "aEthUSDC",
                "groupLabel": "Supply",
                "balanceUSD": 1000.0,
                "tokens": [{
                    "type": "base-token",
                    "symbol": "USDC",
                    "address": "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
                    "network": "ethereum",
                    "balance": 1000.0,
                    "balanceUSD": 1000.0,
                    "price": 1.0
                }]
            }}]}
        })
    }

    fn rewards_app() -> Value {
        json!({
            "balanceUSD": 250.0,
            "app": { "displayName": "Moola", "slug": "moola-market", "category": null },
            "network": { "name": "CELO", "chainId": 42220 },
            "positionBalances": { "edges": [{ "node": {
                "type": "contract-position",
                "balanceUSD": 250.0,
                "displayProps": { "label": "cUSD Lending", "images": [] },
                "tokens": [
                    {
                        "metaType": "SUPPLIED",
                        "token": { "type": "base-token", "symbol": "cUSD", "balance": 240.0, "balanceUSD": 240.0, "price": 1.0 }
                    },
                    {
                        "metaType": "CLAIMABLE",
                        "token": { "type": "base-token", "symbol": "MOO", "balance": 500.0, "balanceUSD": 10.0, "price": 0.02 }
                    }
                ]
            }}]}
        })
    }

    #[test]
    fn test_aave_position_end_to_end() {
        let data = portfolio(json!({
            "appBalances": {
                "totalBalanceUSD": 1000.0,
                "byApp": { "edges": [{ "node": aave_app() }] }
            }
        }));

        let result = normalize(&data).unwrap();

        assert_eq!(result.protocols.len(), 1);
        let protocol = &result.protocols[0];
        assert_eq!(protocol.name, "Aave V3");
        assert_eq!(protocol.category, "Lending (Aave)");
        assert_eq!(protocol.chain_id, 1);
        assert!((protocol.total_value - 1000.0).abs() < f64::EPSILON);

        assert_eq!(protocol.positions[0].label(), "Supply");
        assert_eq!(protocol.positions[0].tokens()[0].symbol, "USDC");
        assert_eq!(protocol.positions[0].tokens()[0].level, Some(0));

        let category = &result.categories["Lending (Aave)"];
        assert!((category.total_value - 1000.0).abs() < f64::EPSILON);
        assert!(result.claimables.is_empty());
    }

    #[test]
    fn test_total_value_is_copied_not_recomputed() {
        let mut app = aave_app();
        app["balanceUSD"] = json!(1234.5678);
        let data = portfolio(json!({ "appBalances": { "byApp": { "edges": [{ "node": app }] } } }));

        let result = normalize(&data).unwrap();

        assert_eq!(result.protocols[0].total_value.to_bits(), 1234.5678_f64.to_bits());
        assert_eq!(
            result.categories["Lending (Aave)"].total_value.to_bits(),
            1234.5678_f64.to_bits()
        );
    }

    #[test]
    fn test_claimable_legs_are_recorded_once() {
        let data = portfolio(json!({
            "appBalances": { "byApp": { "edges": [{ "node": rewards_app() }] } }
        }));

        let result = normalize(&data).unwrap();

        let position = &result.protocols[0].positions[0];
        assert_eq!(position.label(), "cUSD Lending");
        let claimable_legs: Vec<_> = position
            .tokens()
            .iter()
            .filter(|t| t.meta_type.as_deref() == Some("CLAIMABLE"))
            .collect();
        assert_eq!(claimable_legs.len(), 1);

        assert_eq!(
            result.claimables,
            vec![Claimable {
                protocol: "Moola".to_owned(),
                symbol: "MOO".to_owned(),
                balance: 500.0,
                balance_usd: 10.0,
                network: "CELO".to_owned(),
            }]
        );
        assert!((result.total_claimable_usd() - 10.0).abs() < f64::EPSILON);
        assert_eq!(result.protocols[0].category, "Lending (Moola)");
    }

    #[test]
    fn test_absent_token_balances_yield_empty_tokens() {
        let data = portfolio(json!({
            "appBalances": {
                "totalBalanceUSD": 1000.0,
                "byApp": { "edges": [{ "node": aave_app() }] }
            }
        }));

        let result = normalize(&data).unwrap();

        assert!(result.tokens.is_empty());
        assert!(!result.protocols.is_empty());
        assert!(result.summary.total_tokens.abs() < f64::EPSILON);
        assert!((result.summary.grand_total - 1000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_portfolio_is_an_error() {
        let data: PortfolioData = serde_json::from_value(json!({ "portfolioV2": null })).unwrap();
        assert_eq!(normalize(&data), Err(NormalizeError::MissingPortfolio));

        let empty = PortfolioData::default();
        assert_eq!(normalize(&empty), Err(NormalizeError::MissingPortfolio));
    }

    #[test]
    fn test_empty_portfolio_degrades_to_empty_collections() {
        let result = normalize(&portfolio(json!({}))).unwrap();
        assert_eq!(result, ReservePortfolio::default());
    }

    #[test]
    fn test_wallet_tokens_keep_input_order() {
        let data = portfolio(json!({
            "tokenBalances": {
                "totalBalanceUSD": 300.0,
                "byToken": { "totalCount": 2, "edges": [
                    { "node": {
                        "symbol": "CELO", "name": "Celo native asset", "tokenAddress": "0x471ece3750da237f93b8e339c536989b8978a438",
                        "balance": 400.0, "balanceUSD": 200.0, "price": 0.5,
                        "network": { "name": "CELO", "chainId": 42220 }
                    }},
                    { "node": {
                        "symbol": "WETH", "tokenAddress": "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2",
                        "balance": 0.05, "balanceUSD": 100.0, "price": 2000.0,
                        "network": { "name": "ETHEREUM", "chainId": 1 }
                    }}
                ]}
            },
            "nftBalances": { "totalBalanceUSD": 5.0 }
        }));

        let result = normalize(&data).unwrap();

        let symbols: Vec<_> = result.tokens.iter().map(|t| t.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["CELO", "WETH"]);
        assert!(result.tokens.iter().all(|t| {
            t.protocol.as_deref() == Some(WALLET_PROTOCOL)
                && t.category.as_deref() == Some(WALLET_CATEGORY)
        }));
        assert_eq!(result.tokens[0].name.as_deref(), Some("Celo native asset"));
        assert_eq!(result.tokens[1].network, "ETHEREUM");
        assert!((result.summary.grand_total - 305.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_categories_and_networks_are_folded_per_app() {
        let mut aave_celo = aave_app();
        aave_celo["balanceUSD"] = json!(500.0);
        aave_celo["network"] = json!({ "name": "CELO", "chainId": 42220 });

        let data = portfolio(json!({
            "tokenBalances": { "byToken": { "edges": [{ "node": {
                "symbol": "cUSD", "balanceUSD": 50.0, "network": { "name": "CELO", "chainId": 42220 }
            }}]}},
            "appBalances": {
                "totalBalanceUSD": 1750.0,
                "byApp": { "edges": [
                    { "node": aave_app() },
                    { "node": aave_celo },
                    { "node": rewards_app() }
                ]}
            }
        }));

        let result = normalize(&data).unwrap();

        let aave = &result.categories["Lending (Aave)"];
        assert!((aave.total_value - 1500.0).abs() < f64::EPSILON);
        assert_eq!(aave.protocols, vec!["Aave V3", "Aave V3"]);
        assert_eq!(aave.unique_protocols(), vec!["Aave V3"]);
        assert_eq!(aave.networks, vec!["ETHEREUM", "CELO"]);

        let celo = &result.networks["CELO"];
        assert!((celo.wallet_value - 50.0).abs() < f64::EPSILON);
        assert!((celo.app_value - 750.0).abs() < f64::EPSILON);
        assert!((celo.total_value - 800.0).abs() < f64::EPSILON);
        assert!((result.networks["ETHEREUM"].app_value - 1000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_meta_types_are_copied() {
        let data = portfolio(json!({
            "appBalances": { "byMetaType": { "edges": [
                { "node": { "metaType": "SUPPLIED", "positionCount": 3, "balanceUSD": 900.0 } },
                { "node": { "metaType": "CLAIMABLE", "positionCount": 1, "balanceUSD": 10.0 } }
            ]}}
        }));

        let result = normalize(&data).unwrap();

        assert_eq!(
            result.meta_types["SUPPLIED"],
            MetaTypeBreakdown {
                position_count: 3,
                balance_usd: 900.0
            }
        );
        assert_eq!(result.meta_types["CLAIMABLE"].position_count, 1);
    }

    #[test]
    fn test_positions_without_tokens_are_skipped() {
        let data = portfolio(json!({
            "appBalances": { "byApp": { "edges": [{ "node": {
                "balanceUSD": 10.0,
                "app": { "displayName": "Curve", "slug": "curve" },
                "network": { "name": "ETHEREUM", "chainId": 1 },
                "positionBalances": { "edges": [
                    { "node": { "type": "app-token", "symbol": "3CRV", "balanceUSD": 10.0, "tokens": [] } },
                    { "node": { "type": "contract-position", "balanceUSD": 0.0, "tokens": null } },
                    { "node": { "type": "non-fungible-position" } }
                ]}
            }}]}}
        }));

        let result = normalize(&data).unwrap();

        assert_eq!(result.protocols.len(), 1);
        assert!(result.protocols[0].positions.is_empty());
        assert_eq!(result.protocols[0].category, "DEX (Curve)");
    }

    #[test]
    fn test_normalization_is_deterministic() {
        let data = portfolio(json!({
            "tokenBalances": { "totalBalanceUSD": 50.0 },
            "appBalances": {
                "totalBalanceUSD": 1250.0,
                "byApp": { "edges": [{ "node": aave_app() }, { "node": rewards_app() }] },
                "byMetaType": { "edges": [{ "node": { "metaType": "SUPPLIED", "positionCount": 2, "balanceUSD": 1240.0 } }] }
            }
        }));

        let first = serde_json::to_vec(&normalize(&data).unwrap()).unwrap();
        let second = serde_json::to_vec(&normalize(&data).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_categorizer_is_used() {
        struct Flat;
        impl Categorizer for Flat {
            fn categorize(&self, _slug: &str, _declared_category: &str) -> String {
                "Everything".to_owned()
            }
        }

        let data = portfolio(json!({
            "appBalances": { "byApp": { "edges": [{ "node": aave_app() }, { "node": rewards_app() }] } }
        }));
        let result = Normalizer::with_categorizer(Flat).normalize(&data).unwrap();

        assert_eq!(result.categories.len(), 1);
        assert_eq!(
            result.categories["Everything"].unique_protocols(),
            vec!["Aave V3", "Moola"]
        );
    }

    #[test]
    fn test_category_breakdown_is_sorted_by_value() {
        let data = portfolio(json!({
            "appBalances": {
                "totalBalanceUSD": 1250.0,
                "byApp": { "edges": [{ "node": rewards_app() }, { "node": aave_app() }] }
            }
        }));

        let result = normalize(&data).unwrap();
        let breakdown = result.category_breakdown();

        assert_eq!(breakdown[0].category, "Lending (Aave)");
        assert!((breakdown[0].share_pct - 80.0).abs() < 1e-9);
        assert_eq!(breakdown[1].category, "Lending (Moola)");
        assert_eq!(breakdown[1].networks, vec!["CELO"]);

        let protocols = result.protocol_breakdown();
        assert_eq!(protocols[0].name, "Moola");
        assert_eq!(protocols[0].position_count, 1);
    }
}
