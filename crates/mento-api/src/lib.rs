pub mod docs;
pub mod dto;
pub mod errors;
pub mod handlers;
pub mod helpers;
pub mod router;

use std::net::SocketAddr;
use std::sync::Arc;
use std::{env, time::Duration};

use anyhow::Context;
use axum::http::{HeaderValue, Method};
use axum_tracing_opentelemetry::middleware::{OtelAxumLayer, OtelInResponseLayer};
use mento_metrics::MetricsRegistry;
use mento_types::ReserveTargets;
use mento_zapper::PortfolioProvider;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;

use pragma_common::services::{Service, ServiceRunner};

use docs::ApiDoc;
use router::api_router;

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn PortfolioProvider>,
    pub targets: Arc<ReserveTargets>,
    pub metrics: Arc<MetricsRegistry>,
}

pub struct ApiService {
    state: AppState,
    host: String,
    port: u16,
    request_timeout: Duration,
}

impl ApiService {
    pub fn new(state: AppState, host: &str, port: u16, request_timeout: Duration) -> Self {
        Self {
            state,
            host: host.to_owned(),
            port,
            request_timeout,
        }
    }
}

/// The API is read-only, so restricted CORS only ever allows GET.
fn cors_layer_from_env() -> CorsLayer {
    let Ok(origins) = env::var("CORS_ALLOWED_ORIGINS") else {
        tracing::info!("CORS_ALLOWED_ORIGINS not set; using permissive CORS configuration");
        return CorsLayer::permissive();
    };

    let allowed_origins: Vec<HeaderValue> = origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(
                    origin,
                    error = %err,
                    "Invalid origin in CORS_ALLOWED_ORIGINS, skipping",
                );
                None
            }
        })
        .collect();

    if allowed_origins.is_empty() {
        tracing::warn!(
            "CORS_ALLOWED_ORIGINS was set but no valid origins were parsed; falling back to permissive CORS",
        );
        return CorsLayer::permissive();
    }

    tracing::info!(allowed = %origins, "Configured restricted CORS origins from environment");

    CorsLayer::new()
        .allow_headers(AllowHeaders::mirror_request())
        .allow_methods(AllowMethods::list([Method::GET, Method::OPTIONS]))
        .allow_origin(AllowOrigin::list(allowed_origins))
}

#[async_trait::async_trait]
impl Service for ApiService {
    async fn start<'a>(&mut self, mut runner: ServiceRunner<'a>) -> anyhow::Result<()> {
        ApiDoc::generate_openapi_json("./".into())?;

        let host = self.host.clone();
        let port = self.port;
        let request_timeout = self.request_timeout;
        let state = self.state.clone();

        runner.spawn_loop(move |ctx| async move {
            let address = format!("{host}:{port}");
            let socket_addr: SocketAddr = address.parse()?;
            let listener = TcpListener::bind(socket_addr).await?;

            tracing::info!(
                timeout_secs = request_timeout.as_secs(),
                targets = state.targets.addresses.len(),
                "Request timeout configured"
            );

            #[allow(clippy::default_constructed_unit_structs)]
            let app = api_router::<ApiDoc>(state.clone())
                .with_state(state)
                // include trace context as header into the response
                .layer(OtelInResponseLayer::default())
                // start OpenTelemetry trace on incoming request
                .layer(OtelAxumLayer::default())
                .layer(TimeoutLayer::new(request_timeout))
                .layer(cors_layer_from_env());

            tracing::info!("🧩 API started at http://{}", socket_addr);

            let token = ctx.token.clone();
            let shutdown = async move { token.cancelled().await };

            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .with_graceful_shutdown(shutdown)
            .await
            .context("😱 API server stopped!")
        });

        Ok(())
    }
}
