#[cfg(test)]
mod tests {
    use crate::billing::BillingPeriod;
    use crate::errors::{DatabaseError, Error, Result, ValidationError};
    use crate::fx::{Currency, ExchangeRate, FxServiceTrait, RateCache};
    use crate::subscriptions::{
        NewSubscription, Subscription, SubscriptionRepositoryTrait, SubscriptionService,
        SubscriptionServiceTrait, SubscriptionUpdate,
    };
    use async_trait::async_trait;
    use chrono::{NaiveDate, Utc};
    use rust_decimal_macros::dec;
    use std::sync::{Arc, Mutex};

    // =========================================================================
    // Mocks
    // =========================================================================

    #[derive(Clone, Default)]
    struct MockSubscriptionRepository {
        rows: Arc<Mutex<Vec<Subscription>>>,
    }

    impl MockSubscriptionRepository {
        fn row(&self, id: &str) -> Option<Subscription> {
            self.rows.lock().unwrap().iter().find(|s| s.id == id).cloned()
        }
    }

    #[async_trait]
    impl SubscriptionRepositoryTrait for MockSubscriptionRepository {
        fn list_active(&self) -> Result<Vec<Subscription>> {
            let mut active: Vec<Subscription> = self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|s| s.active)
                .cloned()
                .collect();
            active.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(active)
        }

        fn get_by_id(&self, subscription_id: &str) -> Result<Subscription> {
            self.row(subscription_id).ok_or_else(|| {
                Error::Database(DatabaseError::NotFound(format!(
                    "Subscription {}",
                    subscription_id
                )))
            })
        }

        async fn insert(&self, subscription: Subscription) -> Result<Subscription> {
            self.rows.lock().unwrap().push(subscription.clone());
            Ok(subscription)
        }

        async fn update(&self, subscription: Subscription) -> Result<Subscription> {
            let mut rows = self.rows.lock().unwrap();
            let slot = rows
                .iter_mut()
                .find(|s| s.id == subscription.id)
                .ok_or_else(|| Error::Database(DatabaseError::NotFound(subscription.id.clone())))?;
            *slot = subscription.clone();
            Ok(subscription)
        }

        async fn deactivate(&self, subscription_id: &str) -> Result<()> {
            let mut rows = self.rows.lock().unwrap();
            let slot = rows
                .iter_mut()
                .find(|s| s.id == subscription_id)
                .ok_or_else(|| {
                    Error::Database(DatabaseError::NotFound(subscription_id.to_string()))
                })?;
            slot.active = false;
            Ok(())
        }
    }

    struct MockFxService {
        rates: RateCache,
    }

    #[async_trait]
    impl FxServiceTrait for MockFxService {
        async fn get_current_rates(&self) -> RateCache {
            self.rates.clone()
        }

        async fn refresh_rates(&self) -> Result<RateCache> {
            Ok(self.rates.clone())
        }

        fn get_cached_rates(&self) -> Result<RateCache> {
            Ok(self.rates.clone())
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn service_with(
        repo: &MockSubscriptionRepository,
        rates: Vec<ExchangeRate>,
    ) -> SubscriptionService {
        SubscriptionService::new(
            Arc::new(repo.clone()),
            Arc::new(MockFxService {
                rates: RateCache::new(rates),
            }),
        )
    }

    fn new_sub(name: &str, cost: rust_decimal::Decimal, currency: &str, period: &str) -> NewSubscription {
        NewSubscription {
            id: None,
            name: name.to_string(),
            service_id: None,
            cost,
            currency: currency.to_string(),
            period: period.to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            active: None,
        }
    }

    // =========================================================================
    // Tests
    // =========================================================================

    #[tokio::test]
    async fn test_create_and_list_active() {
        let repo = MockSubscriptionRepository::default();
        let svc = service_with(&repo, vec![]);

        svc.create_subscription(new_sub("Video", dec!(399), "RUB", "monthly"))
            .await
            .unwrap();
        svc.create_subscription(new_sub("Cloud", dec!(2.99), "usd", "monthly"))
            .await
            .unwrap();

        let names: Vec<String> = svc
            .get_subscriptions()
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Cloud", "Video"]);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_payload_before_storage() {
        let repo = MockSubscriptionRepository::default();
        let svc = service_with(&repo, vec![]);

        let err = svc
            .create_subscription(new_sub("Bad", dec!(-5), "RUB", "monthly"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::InvalidInput(_))
        ));

        let err = svc
            .create_subscription(new_sub("Bad", dec!(5), "JPY", "monthly"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(repo.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_is_soft() {
        let repo = MockSubscriptionRepository::default();
        let svc = service_with(&repo, vec![]);
        let created = svc
            .create_subscription(new_sub("Gym", dec!(2500), "RUB", "monthly"))
            .await
            .unwrap();

        svc.delete_subscription(&created.id).await.unwrap();

        assert!(svc.get_subscriptions().unwrap().is_empty());
        let stored = repo.row(&created.id).unwrap();
        assert!(!stored.active);
    }

    #[tokio::test]
    async fn test_update_missing_subscription_is_not_found() {
        let repo = MockSubscriptionRepository::default();
        let svc = service_with(&repo, vec![]);
        let err = svc
            .update_subscription("missing", SubscriptionUpdate::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_update_changes_period() {
        let repo = MockSubscriptionRepository::default();
        let svc = service_with(&repo, vec![]);
        let created = svc
            .create_subscription(new_sub("News", dec!(1200), "RUB", "monthly"))
            .await
            .unwrap();

        let updated = svc
            .update_subscription(
                &created.id,
                SubscriptionUpdate {
                    period: Some("yearly".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.period, BillingPeriod::Yearly);
        assert_eq!(updated.monthly_cost(), dec!(100));
        assert_eq!(repo.row(&created.id).unwrap().period, BillingPeriod::Yearly);
    }

    #[tokio::test]
    async fn test_views_flag_near_payments() {
        let repo = MockSubscriptionRepository::default();
        let svc = service_with(&repo, vec![]).with_near_threshold_days(5);
        svc.create_subscription(new_sub("Soon", dec!(100), "RUB", "monthly"))
            .await
            .unwrap();
        svc.create_subscription(new_sub("Forever", dec!(9000), "RUB", "lifetime"))
            .await
            .unwrap();

        let today = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();
        let views = svc.get_subscription_views(today).unwrap();

        let forever = views.iter().find(|v| v.subscription.name == "Forever").unwrap();
        assert_eq!(forever.next_payment_date, None);
        assert!(!forever.is_payment_near);

        let soon = views.iter().find(|v| v.subscription.name == "Soon").unwrap();
        assert_eq!(soon.next_payment_date, NaiveDate::from_ymd_opt(2024, 3, 10));
        assert!(soon.is_payment_near);
    }

    #[tokio::test]
    async fn test_spend_summary_uses_current_rates() {
        let repo = MockSubscriptionRepository::default();
        let usd = ExchangeRate::new(Currency::Usd, dec!(90), Utc::now()).unwrap();
        let svc = service_with(&repo, vec![usd]);

        svc.create_subscription(new_sub("Rent a server", dec!(1000), "RUB", "monthly"))
            .await
            .unwrap();
        svc.create_subscription(new_sub("Password manager", dec!(10), "USD", "yearly"))
            .await
            .unwrap();
        let dropped = svc
            .create_subscription(new_sub("Old", dec!(500), "RUB", "monthly"))
            .await
            .unwrap();
        svc.delete_subscription(&dropped.id).await.unwrap();

        let summary = svc.get_spend_summary().await.unwrap();
        assert_eq!(summary.total_monthly.round_dp(2), dec!(1075));
        assert_eq!(summary.monthly_only, dec!(1000));
        assert_eq!(summary.subscription_count, 2);
        assert!(summary.unconverted_currencies.is_empty());
    }
}
