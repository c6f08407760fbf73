//! Subscriptions module - domain models, services, and traits.

mod subscriptions_model;
mod subscriptions_service;
mod subscriptions_traits;

#[cfg(test)]
mod subscriptions_service_tests;

pub use subscriptions_model::{NewSubscription, Subscription, SubscriptionUpdate, SubscriptionView};
pub use subscriptions_service::SubscriptionService;
pub use subscriptions_traits::{SubscriptionRepositoryTrait, SubscriptionServiceTrait};
