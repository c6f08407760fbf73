use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use subtrack_core::fx::ExchangeRate;

/// Current rates; served from cache and refreshed when stale.
async fn get_exchange_rates(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<ExchangeRate>>> {
    let rates = state.fx_service.get_current_rates().await;
    Ok(Json(rates.to_vec()))
}

/// Forces a fetch from the rate source regardless of cache age.
async fn refresh_exchange_rates(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<ExchangeRate>>> {
    let rates = state.fx_service.refresh_rates().await?;
    Ok(Json(rates.to_vec()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/exchange-rates", get(get_exchange_rates))
        .route("/exchange-rates/refresh", post(refresh_exchange_rates))
}
