use crate::cli::ServeArgs;
use crate::infra::{default_evaluation_config, AppState, InMemoryApplicationRepository};
use crate::routes::with_application_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use credit_ai::config::AppConfig;
use credit_ai::error::AppError;
use credit_ai::lending::applications::LoanApplicationService;
use credit_ai::telemetry;
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

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryApplicationRepository::default());
    let evaluation_config = default_evaluation_config();
    info!(
        approval_threshold = evaluation_config.approval_threshold,
        minimum_cibil_score = evaluation_config.minimum_cibil_score,
        "scoring policy loaded"
    );
    let application_service = Arc::new(LoanApplicationService::new(repository, evaluation_config));

    let app = with_application_routes(application_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "credit decision service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
