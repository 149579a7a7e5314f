use crate::cli::ServeArgs;
use crate::infra::{build_service, load_registry, AppState};
use crate::routes::with_builder_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use page_builder::config::AppConfig;
use page_builder::error::AppError;
use page_builder::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let registry = load_registry(&config.builder, None)?;
    info!(
        block_types = registry.len(),
        schema_file = ?config.builder.schema_path,
        "block registry loaded"
    );

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = with_builder_routes(build_service(registry))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "page builder validation service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
