use careconnect::config::RosterConfig;
use careconnect::error::AppError;
use careconnect::workflows::caregivers::seed::seed_if_empty;
use careconnect::workflows::caregivers::{
    CaregiverAdminService, Gender, MemoryCaregiverRepository, RosterImporter,
};
use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type RosterService = CaregiverAdminService<MemoryCaregiverRepository>;

/// Builds the in-memory roster from the configured CSV export, or the sample caregivers.
pub(crate) fn load_roster(config: &RosterConfig) -> Result<Arc<RosterService>, AppError> {
    let repository = Arc::new(MemoryCaregiverRepository::new());
    let service = Arc::new(CaregiverAdminService::new(repository));

    match config.seed_csv.as_ref() {
        Some(path) => {
            let imported = RosterImporter::from_path(path, &service)?;
            info!(imported, path = %path.display(), "roster loaded from csv");
        }
        None => {
            seed_if_empty(&service)?;
        }
    }

    Ok(service)
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_gender(raw: &str) -> Result<Gender, String> {
    Gender::parse(raw).ok_or_else(|| format!("'{raw}' is not a gender (male or female)"))
}
