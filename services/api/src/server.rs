use crate::cli::ServeArgs;
use crate::infra::{results_calculator, AppState};
use crate::routes::router;
use axum_prometheus::PrometheusMetricLayer;
use localisation::config::AppConfig;
use localisation::error::AppError;
use localisation::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    if config.routing.transit_scenario.is_none() {
        warn!("TRANSIT_SCENARIO_ID is not set, accessibility and routing results will be null");
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        calculator: results_calculator(&config.routing),
    };

    let app = router(app_state).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        routing = %config.routing.service_url,
        "localisation calculation service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
