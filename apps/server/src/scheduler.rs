//! Background scheduler that keeps the exchange-rate cache warm.
//!
//! Each tick asks the FX service for current rates, which only reaches the
//! rate source when the cache has gone stale.

use std::sync::Arc;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, info};

use crate::main_lib::AppState;

/// Initial delay before the first check, so startup is not held up by the network
const INITIAL_DELAY_SECS: u64 = 5;

/// Starts the background rate refresh; a zero interval disables it.
pub fn start_rate_refresh_scheduler(state: Arc<AppState>, every: Duration) {
    if every.is_zero() {
        info!("Exchange rate refresh scheduler disabled");
        return;
    }

    tokio::spawn(async move {
        info!(
            "Exchange rate refresh scheduler started ({}s interval)",
            every.as_secs()
        );
        tokio::time::sleep(Duration::from_secs(INITIAL_DELAY_SECS)).await;

        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let rates = state.fx_service.get_current_rates().await;
            debug!(
                "Scheduled rate check: {} rate(s), newest from {:?}",
                rates.len(),
                rates.newest_updated_at()
            );
        }
    });
}
