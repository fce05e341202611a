use green_rating::config::StorageConfig;
use green_rating::storage::{SqliteEvaluationRepository, StorageError};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn open_repository(
    config: &StorageConfig,
) -> Result<SqliteEvaluationRepository, StorageError> {
    let repository = SqliteEvaluationRepository::open(&config.database_path)?;
    info!(path = %config.database_path.display(), "evaluation database ready");
    Ok(repository)
}
