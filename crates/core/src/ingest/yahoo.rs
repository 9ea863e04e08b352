use crate::config::Settings;
use crate::ingest::error::ProviderError;
use crate::ingest::provider::{build_http_client, join_url, MarketDataProvider};
use crate::ingest::types::Candle;
use anyhow::{Context, Result};
use chrono::DateTime;
use serde::Deserialize;

const PROVIDER: &str = "yahoo_chart";
const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";
const CHART_PATH: &str = "/v8/finance/chart";

const RANGE: &str = "1d";
const INTERVAL: &str = "5m";

#[derive(Debug, Clone)]
pub struct YahooChartClient {
    http: reqwest::Client,
    base_url: String,
}

impl YahooChartClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let base_url = settings
            .market_data_base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let http = build_http_client(PROVIDER, settings.provider_timeout())?;

        Ok(Self { http, base_url })
    }

    fn chart_url(&self, ticker: &str) -> Result<reqwest::Url> {
        let mut url = reqwest::Url::parse(&join_url(&self.base_url, CHART_PATH))
            .with_context(|| format!("invalid market data base url: {}", self.base_url))?;
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("market data base url cannot carry a path"))?
            .pop_if_empty()
            .push(ticker);
        Ok(url)
    }
}

#[async_trait::async_trait]
impl MarketDataProvider for YahooChartClient {
    fn provider_name(&self) -> &'static str {
        PROVIDER
    }

    async fn fetch_intraday_series(&self, ticker: &str) -> Result<Vec<Candle>> {
        let url = self.chart_url(ticker)?;

        let res = self
            .http
            .get(url)
            .query(&[
                ("range", RANGE),
                ("interval", INTERVAL),
                ("includePrePost", "false"),
            ])
            .send()
            .await
            .context("yahoo chart request failed")?;

        let status = res.status();
        let text = res
            .text()
            .await
            .context("failed to read yahoo chart response")?;

        // Unknown symbols come back as 404 with a structured `chart.error`.
        let parsed = serde_json::from_str::<ChartResponse>(&text);
        if let Ok(body) = &parsed {
            if let Some(err) = &body.chart.error {
                if err.is_not_found() {
                    tracing::debug!(ticker, error = %err.describe(), "yahoo has no data for symbol");
                    return Ok(Vec::new());
                }
                return Err(ProviderError::new(PROVIDER, "chart", err.describe()).into());
            }
        }

        if !status.is_success() {
            return Err(ProviderError::new(PROVIDER, "http", format!("status={status}: {text}")).into());
        }

        let body = parsed.context("failed to parse yahoo chart response")?;
        let candles = candles_from_chart(body)?;

        tracing::debug!(ticker, bars = candles.len(), "yahoo chart fetched");
        Ok(candles)
    }
}

fn candles_from_chart(body: ChartResponse) -> Result<Vec<Candle>> {
    let Some(result) = body.chart.result.and_then(|r| r.into_iter().next()) else {
        return Ok(Vec::new());
    };

    let offset = result.meta.gmtoffset.unwrap_or(0);
    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();

    let mut out = Vec::with_capacity(result.timestamp.len());
    for (i, epoch) in result.timestamp.iter().enumerate() {
        // Exchange-local wall clock, matching the index the provider's
        // tabular series is labelled with.
        let timestamp = DateTime::from_timestamp(epoch + offset, 0)
            .with_context(|| format!("yahoo timestamp out of range: {epoch}"))?
            .naive_utc();

        out.push(Candle {
            timestamp,
            open: at(&quote.open, i),
            high: at(&quote.high, i),
            low: at(&quote.low, i),
            close: at(&quote.close, i),
            volume: at(&quote.volume, i),
        });
    }

    Ok(out)
}

fn at(values: &[Option<f64>], i: usize) -> Option<f64> {
    values.get(i).copied().flatten()
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    description: String,
}

impl ChartError {
    fn is_not_found(&self) -> bool {
        self.code.eq_ignore_ascii_case("Not Found")
    }

    fn describe(&self) -> String {
        match (self.code.is_empty(), self.description.is_empty()) {
            (false, false) => format!("{}: {}", self.code, self.description),
            (true, false) => self.description.clone(),
            _ => self.code.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    #[serde(default)]
    indicators: Indicators,
}

#[derive(Debug, Default, Deserialize)]
struct ChartMeta {
    #[serde(default)]
    gmtoffset: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteColumns>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteColumns {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}
