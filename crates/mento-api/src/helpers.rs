use mento_metrics::FetchOutcome;
use mento_portfolio::{ReservePortfolio, normalize};

use crate::{AppState, errors::ApiError};

/// Fetches a fresh snapshot for the configured reserve addresses and
/// normalizes it. Nothing is cached between calls.
pub async fn load_portfolio(state: &AppState) -> Result<ReservePortfolio, ApiError> {
    let metrics = &state.metrics.portfolio;

    let data = state
        .provider
        .fetch_portfolio(&state.targets)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch reserve portfolio: {e}");
            metrics.record_fetch(FetchOutcome::UpstreamError);
            ApiError::from(e)
        })?;

    let portfolio = normalize(&data).map_err(|e| {
        tracing::error!("Failed to normalize reserve portfolio: {e}");
        metrics.record_fetch(FetchOutcome::MalformedResponse);
        ApiError::from(e)
    })?;

    metrics.record_fetch(FetchOutcome::Success);
    metrics.record_normalized(portfolio.protocols.len(), portfolio.claimables.len());

    Ok(portfolio)
}
