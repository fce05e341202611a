use crate::cli::ServeArgs;
use crate::infra::{open_repository, AppState};
use crate::routes::with_evaluation_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use green_rating::config::AppConfig;
use green_rating::error::AppError;
use green_rating::evaluation::{CriteriaCatalog, EvaluationService, ReviewPolicy};
use green_rating::telemetry;
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
    if let Some(database) = args.database.take() {
        config.storage.database_path = database;
    }

    telemetry::init(&config.telemetry)?;

    let catalog = Arc::new(CriteriaCatalog::standard());
    catalog.validate()?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(open_repository(&config.storage)?);
    let review_policy = ReviewPolicy::from_enforced(config.evaluation.enforce_review);
    let evaluation_service = Arc::new(EvaluationService::new(catalog, repository, review_policy));

    let app = with_evaluation_routes(evaluation_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, ?review_policy, "green rating service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
