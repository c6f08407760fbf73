use std::sync::Arc;

use crate::config::{Config, LogFormat};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};
use subtrack_core::{
    fx::{FxService, FxServiceTrait},
    subscriptions::{SubscriptionService, SubscriptionServiceTrait},
};
use subtrack_market_data::CbrProvider;
use subtrack_storage_sqlite::{
    db::{self, write_actor},
    fx::FxRepository,
    subscriptions::SubscriptionRepository,
};

pub struct AppState {
    pub subscription_service: Arc<dyn SubscriptionServiceTrait + Send + Sync>,
    pub fx_service: Arc<dyn FxServiceTrait + Send + Sync>,
}

/// Installs the global subscriber. `log` records from the library crates are
/// forwarded into it.
pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    let result = match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .try_init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .try_init(),
    };
    if let Err(e) = result {
        eprintln!("Tracing already initialised: {}", e);
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer(pool.clone());

    let fx_repository = Arc::new(FxRepository::new(pool.clone(), writer.clone()));
    let provider = Arc::new(CbrProvider::with_config(
        config.rates_url.clone(),
        config.rates_timeout,
    ));
    let fx_service: Arc<dyn FxServiceTrait + Send + Sync> =
        Arc::new(FxService::new(fx_repository, provider));

    let subscription_repository = Arc::new(SubscriptionRepository::new(pool, writer));
    let subscription_service: Arc<dyn SubscriptionServiceTrait + Send + Sync> = Arc::new(
        SubscriptionService::new(subscription_repository, fx_service.clone())
            .with_near_threshold_days(config.near_threshold_days),
    );

    Ok(Arc::new(AppState {
        subscription_service,
        fx_service,
    }))
}
