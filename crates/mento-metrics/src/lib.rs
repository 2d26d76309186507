use std::sync::Arc;

use opentelemetry::{KeyValue, global, metrics::Counter};

#[derive(Debug)]
pub struct MetricsRegistry {
    pub portfolio: Arc<PortfolioMetrics>,
}

impl MetricsRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            portfolio: PortfolioMetrics::new(),
        })
    }
}

#[derive(Debug)]
pub struct PortfolioMetrics {
    fetches: Counter<u64>,
    protocols_normalized: Counter<u64>,
}

impl PortfolioMetrics {
    fn new() -> Arc<Self> {
        let meter = global::meter("mento-reserve-api");
        let fetches = meter
            .u64_counter("portfolio_fetches_total")
            .with_description("Number of reserve portfolio fetches from the aggregation API")
            .with_unit("count")
            .init();

        let protocols_normalized = meter
            .u64_counter("portfolio_protocols_normalized_total")
            .with_description("Number of app positions normalized into protocol records")
            .with_unit("count")
            .init();

        Arc::new(Self {
            fetches,
            protocols_normalized,
        })
    }

    pub fn record_fetch(&self, outcome: FetchOutcome) {
        self.fetches
            .add(1, &[KeyValue::new("outcome", outcome.as_str())]);
    }

    pub fn record_normalized(&self, protocols: usize, claimables: usize) {
        self.protocols_normalized.add(
            protocols as u64,
            &[KeyValue::new("has_claimables", claimables > 0)],
        );
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    Success,
    UpstreamError,
    MalformedResponse,
}

impl FetchOutcome {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::UpstreamError => "upstream_error",
            Self::MalformedResponse => "malformed_response",
        }
    }
}
