use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};

use crate::billing::{summarize_spend, SpendSummary};
use crate::constants::DEFAULT_PAYMENT_NEAR_THRESHOLD_DAYS;
use crate::errors::Result;
use crate::fx::FxServiceTrait;

use super::subscriptions_model::{
    NewSubscription, Subscription, SubscriptionUpdate, SubscriptionView,
};
use super::subscriptions_traits::{SubscriptionRepositoryTrait, SubscriptionServiceTrait};

pub struct SubscriptionService {
    repository: Arc<dyn SubscriptionRepositoryTrait>,
    fx_service: Arc<dyn FxServiceTrait>,
    near_threshold_days: i64,
}

impl SubscriptionService {
    pub fn new(
        repository: Arc<dyn SubscriptionRepositoryTrait>,
        fx_service: Arc<dyn FxServiceTrait>,
    ) -> Self {
        SubscriptionService {
            repository,
            fx_service,
            near_threshold_days: DEFAULT_PAYMENT_NEAR_THRESHOLD_DAYS,
        }
    }

    pub fn with_near_threshold_days(mut self, days: i64) -> Self {
        self.near_threshold_days = days;
        self
    }
}

#[async_trait]
impl SubscriptionServiceTrait for SubscriptionService {
    fn get_subscriptions(&self) -> Result<Vec<Subscription>> {
        self.repository.list_active()
    }

    fn get_subscription_views(&self, today: NaiveDate) -> Result<Vec<SubscriptionView>> {
        let views = self
            .repository
            .list_active()?
            .into_iter()
            .map(|s| SubscriptionView::new(s, today, self.near_threshold_days))
            .collect();
        Ok(views)
    }

    fn get_subscription(&self, subscription_id: &str) -> Result<Subscription> {
        self.repository.get_by_id(subscription_id)
    }

    async fn create_subscription(&self, new_subscription: NewSubscription) -> Result<Subscription> {
        let subscription = new_subscription.validate(Utc::now().naive_utc())?;
        log::debug!(
            "Creating subscription '{}' ({} {} {})",
            subscription.name,
            subscription.cost,
            subscription.currency,
            subscription.period
        );
        self.repository.insert(subscription).await
    }

    async fn update_subscription(
        &self,
        subscription_id: &str,
        changes: SubscriptionUpdate,
    ) -> Result<Subscription> {
        let existing = self.repository.get_by_id(subscription_id)?;
        let updated = changes.apply_to(existing, Utc::now().naive_utc())?;
        self.repository.update(updated).await
    }

    async fn delete_subscription(&self, subscription_id: &str) -> Result<()> {
        self.repository.deactivate(subscription_id).await
    }

    async fn get_spend_summary(&self) -> Result<SpendSummary> {
        let rates = self.fx_service.get_current_rates().await;
        let subscriptions = self.repository.list_active()?;
        Ok(summarize_spend(&subscriptions, &rates))
    }
}
