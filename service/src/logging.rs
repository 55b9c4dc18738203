use std::time::Instant;

use abi::LogConfig;
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{info, Instrument};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `RUST_LOG` takes precedence over the configured filter.
pub fn init_tracing(config: &LogConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));
    let registry = tracing_subscriber::registry().with(filter);

    if config.json {
        registry
            .with(fmt::layer().with_target(false).json())
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).compact())
            .init();
    }
}

/// One access-log event per request.
pub(crate) async fn access_log(request: Request, next: Next) -> Response {
    let span = tracing::info_span!(
        "http.request",
        method = %request.method(),
        path = %request.uri().path(),
    );
    let start = Instant::now();

    let response = next.run(request).instrument(span.clone()).await;
    span.in_scope(|| {
        info!(
            status = response.status().as_u16(),
            latency_ms = start.elapsed().as_millis() as u64,
            "request completed"
        )
    });
    response
}
