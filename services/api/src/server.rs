use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::api_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use franchise_hub::accounts::AccountService;
use franchise_hub::applications::ApplicationService;
use franchise_hub::config::AppConfig;
use franchise_hub::error::AppError;
use franchise_hub::projections::ProjectionService;
use franchise_hub::store::SqliteStore;
use franchise_hub::telemetry;
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

    let store = SqliteStore::open(&config.database.path)?;
    let accounts = Arc::new(AccountService::new(Arc::new(store.users())));
    let franchises = Arc::new(store.franchises());
    let projections = Arc::new(ProjectionService::with_delay(
        Arc::new(store.calculations()),
        franchises.clone(),
        config.projection.delay,
    ));
    let applications = Arc::new(ApplicationService::new(Arc::new(store.applications())));
    let favorites = Arc::new(store.favorites());

    let app = api_routes(accounts, franchises, projections, applications, favorites)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, database = %config.database.path.display(), "franchise platform ready");

    axum::serve(listener, app).await?;
    Ok(())
}
