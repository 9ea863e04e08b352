pub mod domain;
pub mod ingest;
pub mod pipeline;
pub mod storage;
pub mod time;
pub mod universe;

pub mod config {
    use std::time::Duration;

    /// Relative location of the report consumed by dashboards/alerting.
    pub const OUTPUT_PATH: &str = "data/latest.json";

    #[derive(Debug, Clone, Default)]
    pub struct Settings {
        pub tickers: Option<String>,
        pub weights: Option<String>,
        pub sentry_dsn: Option<String>,
        pub market_data_base_url: Option<String>,
        pub news_base_url: Option<String>,
        pub provider_timeout_secs: Option<u64>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                tickers: std::env::var("TICKERS").ok(),
                weights: std::env::var("WEIGHTS").ok(),
                sentry_dsn: std::env::var("SENTRY_DSN").ok(),
                market_data_base_url: non_blank(std::env::var("MARKET_DATA_BASE_URL").ok()),
                news_base_url: non_blank(std::env::var("NEWS_BASE_URL").ok()),
                provider_timeout_secs: std::env::var("PROVIDER_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.trim().parse::<u64>().ok()),
            })
        }

        /// `None` leaves the transport default in place.
        pub fn provider_timeout(&self) -> Option<Duration> {
            self.provider_timeout_secs.map(Duration::from_secs)
        }
    }

    fn non_blank(v: Option<String>) -> Option<String> {
        v.filter(|s| !s.trim().is_empty())
    }
}
