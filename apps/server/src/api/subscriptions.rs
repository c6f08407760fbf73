use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use subtrack_core::{
    billing::{today, SpendSummary},
    subscriptions::{NewSubscription, Subscription, SubscriptionUpdate, SubscriptionView},
};

async fn list_subscriptions(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<SubscriptionView>>> {
    let views = state.subscription_service.get_subscription_views(today())?;
    Ok(Json(views))
}

async fn get_subscription(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Subscription>> {
    let subscription = state.subscription_service.get_subscription(&id)?;
    Ok(Json(subscription))
}

async fn create_subscription(
    State(state): State<Arc<AppState>>,
    Json(new_subscription): Json<NewSubscription>,
) -> ApiResult<(StatusCode, Json<Subscription>)> {
    let created = state
        .subscription_service
        .create_subscription(new_subscription)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_subscription(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(changes): Json<SubscriptionUpdate>,
) -> ApiResult<Json<Subscription>> {
    let updated = state
        .subscription_service
        .update_subscription(&id, changes)
        .await?;
    Ok(Json(updated))
}

async fn delete_subscription(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.subscription_service.delete_subscription(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_spend_summary(State(state): State<Arc<AppState>>) -> ApiResult<Json<SpendSummary>> {
    let summary = state.subscription_service.get_spend_summary().await?;
    Ok(Json(summary))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/subscriptions",
            get(list_subscriptions).post(create_subscription),
        )
        .route("/subscriptions/summary", get(get_spend_summary))
        .route(
            "/subscriptions/{id}",
            put(update_subscription)
                .get(get_subscription)
                .delete(delete_subscription),
        )
}
