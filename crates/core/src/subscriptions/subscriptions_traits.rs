use crate::billing::SpendSummary;
use crate::errors::Result;
use crate::subscriptions::subscriptions_model::{
    NewSubscription, Subscription, SubscriptionUpdate, SubscriptionView,
};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Trait for subscription repository operations
#[async_trait]
pub trait SubscriptionRepositoryTrait: Send + Sync {
    /// Active subscriptions ordered by name.
    fn list_active(&self) -> Result<Vec<Subscription>>;
    fn get_by_id(&self, subscription_id: &str) -> Result<Subscription>;
    async fn insert(&self, subscription: Subscription) -> Result<Subscription>;
    async fn update(&self, subscription: Subscription) -> Result<Subscription>;
    /// Soft delete: flips `active` off and keeps the row.
    async fn deactivate(&self, subscription_id: &str) -> Result<()>;
}

/// Trait for subscription service operations
#[async_trait]
pub trait SubscriptionServiceTrait: Send + Sync {
    fn get_subscriptions(&self) -> Result<Vec<Subscription>>;
    fn get_subscription_views(&self, today: NaiveDate) -> Result<Vec<SubscriptionView>>;
    fn get_subscription(&self, subscription_id: &str) -> Result<Subscription>;
    async fn create_subscription(&self, new_subscription: NewSubscription) -> Result<Subscription>;
    async fn update_subscription(
        &self,
        subscription_id: &str,
        changes: SubscriptionUpdate,
    ) -> Result<Subscription>;
    async fn delete_subscription(&self, subscription_id: &str) -> Result<()>;
    async fn get_spend_summary(&self) -> Result<SpendSummary>;
}
