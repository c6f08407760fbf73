use subtrack_core::fx::{ExchangeRate, FxRepositoryTrait};
use subtrack_core::Result;

use super::model::ExchangeRateDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::exchange_rates;
use crate::schema::exchange_rates::dsl::*;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

#[derive(Clone)]
pub struct FxRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl FxRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl FxRepositoryTrait for FxRepository {
    fn get_exchange_rates(&self) -> Result<Vec<ExchangeRate>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = exchange_rates
            .order(updated_at.desc())
            .select(ExchangeRateDB::as_select())
            .load::<ExchangeRateDB>(&mut conn)
            .map_err(StorageError::from)?;

        // A bad row is skipped so one record cannot hide the others
        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let code = row.currency_code.clone();
                match ExchangeRate::try_from(row) {
                    Ok(rate) => Some(rate),
                    Err(e) => {
                        log::warn!("Ignoring stored exchange rate for '{}': {}", code, e);
                        None
                    }
                }
            })
            .collect())
    }

    async fn upsert_exchange_rate(&self, rate: ExchangeRate) -> Result<ExchangeRate> {
        let row = ExchangeRateDB::from(&rate);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<ExchangeRate> {
                diesel::insert_into(exchange_rates::table)
                    .values(&row)
                    .on_conflict(currency_code)
                    .do_update()
                    .set((rate_to_rub.eq(&row.rate_to_rub), updated_at.eq(row.updated_at)))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(rate)
            })
            .await
    }
}
