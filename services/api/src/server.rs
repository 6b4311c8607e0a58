use crate::cli::ServeArgs;
use crate::infra::{load_roster, AppState};
use crate::routes::with_careconnect_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use careconnect::config::AppConfig;
use careconnect::error::AppError;
use careconnect::telemetry;
use careconnect::workflows::inquiries::InquiryService;
use careconnect::workflows::notifications::{LogNotificationPublisher, NotificationDispatcher};
use careconnect::workflows::recommendation::{RecommendationSelector, RecommendationService};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    args.apply(&mut config);

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let roster = load_roster(&config.roster)?;

    if config.notifications.admin_recipients.is_empty() {
        warn!("no CARECONNECT_ADMIN_EMAIL_* recipients configured; inquiries will be rejected");
    }
    let dispatcher = Arc::new(NotificationDispatcher::new(
        config.notifications.clone(),
        Arc::new(LogNotificationPublisher),
    ));

    let recommendation_service = Arc::new(RecommendationService::new(
        roster.repository().clone(),
        Arc::new(RecommendationSelector::new()),
        dispatcher.clone(),
    ));
    let inquiry_service = Arc::new(InquiryService::new(dispatcher));

    let app = with_careconnect_routes(recommendation_service, roster, inquiry_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "careconnect service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
