use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use subtrack_core::constants::DEFAULT_PAYMENT_NEAR_THRESHOLD_DAYS;
use subtrack_market_data::provider::cbr::DEFAULT_CBR_URL;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub rates_url: String,
    pub rates_timeout: Duration,
    /// Zero disables the background refresh
    pub rates_refresh_interval: Duration,
    pub near_threshold_days: i64,
    pub log_format: LogFormat,
}

impl Config {
    /// Reads `SUBTRACK_*` variables, loading `.env` first when present.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let listen_addr: SocketAddr = var("SUBTRACK_LISTEN_ADDR", "0.0.0.0:8080")
            .parse()
            .context("Invalid SUBTRACK_LISTEN_ADDR")?;
        let db_path = var("SUBTRACK_DB_PATH", "./db/subtrack.db");
        let cors_allow = var("SUBTRACK_CORS_ALLOW_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = var("SUBTRACK_REQUEST_TIMEOUT_MS", "30000")
            .parse()
            .context("Invalid SUBTRACK_REQUEST_TIMEOUT_MS")?;
        let rates_url = var("SUBTRACK_RATES_URL", DEFAULT_CBR_URL);
        let rates_timeout_ms: u64 = var("SUBTRACK_RATES_TIMEOUT_MS", "10000")
            .parse()
            .context("Invalid SUBTRACK_RATES_TIMEOUT_MS")?;
        let refresh_secs: u64 = var("SUBTRACK_RATES_REFRESH_INTERVAL_SECS", "3600")
            .parse()
            .context("Invalid SUBTRACK_RATES_REFRESH_INTERVAL_SECS")?;
        let near_threshold_days: i64 = var(
            "SUBTRACK_NEAR_THRESHOLD_DAYS",
            &DEFAULT_PAYMENT_NEAR_THRESHOLD_DAYS.to_string(),
        )
        .parse()
        .context("Invalid SUBTRACK_NEAR_THRESHOLD_DAYS")?;
        anyhow::ensure!(
            near_threshold_days >= 0,
            "SUBTRACK_NEAR_THRESHOLD_DAYS must not be negative, got {}",
            near_threshold_days
        );
        let log_format = if var("SUBTRACK_LOG_FORMAT", "text").eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        };

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            rates_url,
            rates_timeout: Duration::from_millis(rates_timeout_ms),
            rates_refresh_interval: Duration::from_secs(refresh_secs),
            near_threshold_days,
            log_format,
        })
    }
}
