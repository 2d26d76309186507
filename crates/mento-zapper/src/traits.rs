use mento_types::{PortfolioData, ReserveTargets};

use crate::error::ZapperError;

/// Source of raw portfolio snapshots for a set of reserve addresses.
#[async_trait::async_trait]
pub trait PortfolioProvider: Send + Sync {
    async fn fetch_portfolio(&self, targets: &ReserveTargets)
    -> Result<PortfolioData, ZapperError>;
}
