use crate::cli::ServeArgs;
use crate::infra::{build_sources, AppState};
use crate::routes::with_market_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use propsight::config::AppConfig;
use propsight::error::AppError;
use propsight::markets::predictions::{MarketState, PredictionService};
use propsight::markets::scoring::CompositeScoringEngine;
use propsight::telemetry;
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

    let listing_feed = args
        .listing_feed
        .take()
        .or_else(|| config.markets.listing_feed.clone());
    let sources = build_sources(listing_feed);
    let market_state = MarketState {
        predictions: Arc::new(PredictionService::new(sources)),
        scoring: Arc::new(CompositeScoringEngine::default()),
    };

    let app = with_market_routes(market_state)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        environment = config.environment.label(),
        %addr,
        "market intelligence service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
