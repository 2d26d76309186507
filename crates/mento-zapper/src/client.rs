use std::time::Duration;

use mento_types::{PortfolioData, ReserveTargets};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Value, json};

use crate::{
    error::ZapperError,
    query::{PORTFOLIO_QUERY, portfolio_variables},
    traits::PortfolioProvider,
};

pub const ZAPPER_API_BASE: &str = "https://public.zapper.xyz";
const API_KEY_HEADER: &str = "x-zapper-api-key";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

impl<T> GraphQlResponse<T> {
    /// A 200 answer may still carry an `errors` array, which fails the whole
    /// request even when partial data is present.
    fn into_data(self) -> Result<T, ZapperError> {
        if let Some(errors) = self.errors.filter(|errors| !errors.is_empty()) {
            let messages = errors
                .into_iter()
                .map(|error| error.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ZapperError::GraphQlErrors(messages));
        }

        self.data.ok_or(ZapperError::MissingData)
    }
}

/// GraphQL client for the portfolio aggregation API, authenticated with a
/// static API key.
pub struct ZapperClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl ZapperClient {
    pub fn new(api_key: &str, base_url: &str) -> Result<Self, ZapperError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            endpoint: format!("{}/graphql", base_url.trim_end_matches('/')),
            api_key: api_key.to_owned(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
    ) -> Result<T, ZapperError> {
        let response = self
            .http
            .post(&self.endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                endpoint = %self.endpoint,
                status = %status,
                body = %body,
                "Portfolio API request failed",
            );
            return Err(ZapperError::UnexpectedStatus { status, body });
        }

        let envelope: GraphQlResponse<T> = response.json().await?;
        envelope.into_data().inspect_err(|err| {
            tracing::error!(endpoint = %self.endpoint, error = %err, "Portfolio API query failed");
        })
    }
}

#[async_trait::async_trait]
impl PortfolioProvider for ZapperClient {
    async fn fetch_portfolio(
        &self,
        targets: &ReserveTargets,
    ) -> Result<PortfolioData, ZapperError> {
        let variables = portfolio_variables(targets);
        tracing::debug!(
            addresses = ?targets.unique_addresses(),
            chain_ids = ?targets.chain_ids(),
            "fetching reserve portfolio",
        );

        self.execute(PORTFOLIO_QUERY, variables).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_is_built_from_base_url() {
        let client = ZapperClient::new("key", "https://public.zapper.xyz/").unwrap();
        assert_eq!(client.endpoint(), "https://public.zapper.xyz/graphql");

        let client = ZapperClient::new("key", ZAPPER_API_BASE).unwrap();
        assert_eq!(client.endpoint(), "https://public.zapper.xyz/graphql");
    }

    #[test]
    fn test_envelope_with_data() {
        let envelope: GraphQlResponse<PortfolioData> = serde_json::from_value(json!({
            "data": { "portfolioV2": { "tokenBalances": { "totalBalanceUSD": 12.5 } } }
        }))
        .unwrap();

        let data = envelope.into_data().unwrap();
        let tokens = data.portfolio_v2.unwrap().token_balances.unwrap();
        assert!((tokens.total_balance_usd - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_envelope_errors_fail_even_with_data() {
        let envelope: GraphQlResponse<PortfolioData> = serde_json::from_value(json!({
            "data": { "portfolioV2": null },
            "errors": [{ "message": "rate limited" }, { "message": "bad address" }]
        }))
        .unwrap();

        match envelope.into_data() {
            Err(ZapperError::GraphQlErrors(messages)) => {
                assert_eq!(messages, "rate limited; bad address");
            }
            other => panic!("expected GraphQL errors, got {other:?}"),
        }
    }

    #[test]
    fn test_envelope_without_data() {
        let envelope: GraphQlResponse<PortfolioData> =
            serde_json::from_value(json!({ "data": null, "errors": [] })).unwrap();

        assert!(matches!(envelope.into_data(), Err(ZapperError::MissingData)));
    }
}
