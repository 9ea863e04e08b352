use crate::ingest::types::{Candle, NewsQuery, RawArticle};
use anyhow::Result;

#[async_trait::async_trait]
pub trait MarketDataProvider: Send + Sync {
    fn provider_name(&self) -> &'static str;

    /// Today's 5-minute bars for `ticker`, oldest first, unadjusted.
    /// An empty vector means the provider had nothing for the symbol.
    async fn fetch_intraday_series(&self, ticker: &str) -> Result<Vec<Candle>>;
}

#[async_trait::async_trait]
pub trait NewsProvider: Send + Sync {
    fn provider_name(&self) -> &'static str;

    async fn search_news(&self, query: &NewsQuery) -> Result<Vec<RawArticle>>;
}

pub(crate) fn build_http_client(
    provider: &'static str,
    timeout: Option<std::time::Duration>,
) -> Result<reqwest::Client> {
    use anyhow::Context;

    let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .with_context(|| format!("failed to build {provider} http client"))
}

// Yahoo rejects requests without a browser-like agent.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

pub(crate) fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
