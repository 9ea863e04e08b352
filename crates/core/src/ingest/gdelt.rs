use crate::config::Settings;
use crate::ingest::error::ProviderError;
use crate::ingest::provider::{build_http_client, join_url, NewsProvider};
use crate::ingest::types::{NewsQuery, RawArticle};
use crate::time::utc::news_date_window;
use anyhow::{Context, Result};
use serde::Deserialize;

const PROVIDER: &str = "gdelt_doc";
const DEFAULT_BASE_URL: &str = "https://api.gdeltproject.org";
const DOC_PATH: &str = "/api/v2/doc/doc";

#[derive(Debug, Clone)]
pub struct GdeltDocClient {
    http: reqwest::Client,
    base_url: String,
}

impl GdeltDocClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let base_url = settings
            .news_base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let http = build_http_client(PROVIDER, settings.provider_timeout())?;

        Ok(Self { http, base_url })
    }

    fn params(query: &NewsQuery, now: chrono::DateTime<chrono::Utc>) -> Vec<(&'static str, String)> {
        let (start, end) = news_date_window(now, query.hours_back);
        vec![
            ("query", query.keyword.clone()),
            ("mode", "artlist".to_string()),
            ("format", "json".to_string()),
            ("maxrecords", query.max_results.to_string()),
            ("startdatetime", start),
            ("enddatetime", end),
        ]
    }
}

#[async_trait::async_trait]
impl NewsProvider for GdeltDocClient {
    fn provider_name(&self) -> &'static str {
        PROVIDER
    }

    async fn search_news(&self, query: &NewsQuery) -> Result<Vec<RawArticle>> {
        let url = join_url(&self.base_url, DOC_PATH);
        let params = Self::params(query, chrono::Utc::now());

        let res = self
            .http
            .get(url)
            .query(&params)
            .send()
            .await
            .context("gdelt doc request failed")?;

        let status = res.status();
        let text = res
            .text()
            .await
            .context("failed to read gdelt doc response")?;
        if !status.is_success() {
            return Err(ProviderError::new(PROVIDER, "http", format!("status={status}: {text}")).into());
        }

        let articles = parse_articles(&text)?;
        tracing::debug!(keyword = %query.keyword, hits = articles.len(), "gdelt search done");
        Ok(articles)
    }
}

fn parse_articles(text: &str) -> Result<Vec<RawArticle>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    // Query problems (phrase too short, bad operators) arrive as plain text.
    let body = serde_json::from_str::<ArtListResponse>(text)
        .map_err(|_| ProviderError::new(PROVIDER, "query", text.trim().to_string()))?;
    Ok(body.articles)
}

#[derive(Debug, Deserialize)]
struct ArtListResponse {
    #[serde(default)]
    articles: Vec<RawArticle>,
}
