use subtrack_core::errors::{DatabaseError, Error};
use subtrack_core::subscriptions::{Subscription, SubscriptionRepositoryTrait};
use subtrack_core::Result;

use super::model::SubscriptionDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::subscriptions;
use crate::schema::subscriptions::dsl::*;
use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

pub struct SubscriptionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

fn not_found(subscription_id: &str) -> Error {
    Error::Database(DatabaseError::NotFound(format!(
        "Subscription {}",
        subscription_id
    )))
}

impl SubscriptionRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        SubscriptionRepository { pool, writer }
    }
}

#[async_trait]
impl SubscriptionRepositoryTrait for SubscriptionRepository {
    fn list_active(&self) -> Result<Vec<Subscription>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = subscriptions
            .filter(active.eq(true))
            .order((name.asc(), created_at.asc()))
            .select(SubscriptionDB::as_select())
            .load::<SubscriptionDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let row_id = row.id.clone();
                match Subscription::try_from(row) {
                    Ok(subscription) => Some(subscription),
                    Err(e) => {
                        log::warn!("Skipping unreadable subscription {}: {}", row_id, e);
                        None
                    }
                }
            })
            .collect())
    }

    fn get_by_id(&self, subscription_id: &str) -> Result<Subscription> {
        let mut conn = get_connection(&self.pool)?;
        let row = subscriptions
            .find(subscription_id)
            .select(SubscriptionDB::as_select())
            .first::<SubscriptionDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .ok_or_else(|| not_found(subscription_id))?;
        Subscription::try_from(row)
    }

    async fn insert(&self, subscription: Subscription) -> Result<Subscription> {
        let row = SubscriptionDB::from(&subscription);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Subscription> {
                let stored = diesel::insert_into(subscriptions::table)
                    .values(&row)
                    .returning(SubscriptionDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Subscription::try_from(stored)
            })
            .await
    }

    async fn update(&self, subscription: Subscription) -> Result<Subscription> {
        let row = SubscriptionDB::from(&subscription);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Subscription> {
                let affected = diesel::update(subscriptions.find(row.id.clone()))
                    .set(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if affected == 0 {
                    return Err(not_found(&row.id));
                }
                Ok(subscription)
            })
            .await
    }

    async fn deactivate(&self, subscription_id: &str) -> Result<()> {
        let target = subscription_id.to_string();
        let now = Utc::now().naive_utc();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                let affected = diesel::update(subscriptions.find(&target))
                    .set((active.eq(false), updated_at.eq(now)))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if affected == 0 {
                    return Err(not_found(&target));
                }
                Ok(())
            })
            .await
    }
}
