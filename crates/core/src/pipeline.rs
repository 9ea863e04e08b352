use crate::domain::report::{
    IntradayQuote, NewsArticle, NewsItem, RunReport, TickerSnapshot, THRESHOLD_PCT,
};
use crate::domain::returns::{pct_change, portfolio_pct};
use crate::ingest::provider::{MarketDataProvider, NewsProvider};
use crate::ingest::types::{Candle, NewsQuery, RawArticle};
use crate::time::utc::{iso_utc, relabel_as_utc};
use crate::universe::Universe;
use chrono::{DateTime, Utc};

/// News lookback for enrichment; not the same as `NewsQuery`'s default.
pub const NEWS_WINDOW_HOURS: u32 = 72;
pub const NEWS_MAX_RESULTS: usize = 5;

const NO_DATA: &str = "no intraday data (ticker may not exist at the source)";
const NO_VALID_CANDLES: &str = "no valid candles after cleaning";

/// Runs one full pass: fetch every ticker in order, aggregate, enrich, and
/// assemble. Per-ticker and per-news failures are folded into the report.
pub async fn build_report<F>(
    universe: &Universe,
    market: &dyn MarketDataProvider,
    news: &dyn NewsProvider,
    now: F,
) -> RunReport
where
    F: FnOnce() -> DateTime<Utc>,
{
    let mut items = Vec::with_capacity(universe.tickers.len());
    for ticker in &universe.tickers {
        items.push(snapshot_ticker(market, ticker).await);
    }

    let pcts: Vec<Option<f64>> = items.iter().map(TickerSnapshot::pct).collect();
    let portfolio = portfolio_pct(&pcts, universe.weights.as_deref());

    for item in &mut items {
        item.news = news_for(news, &item.ticker, item.pct()).await;
    }

    let failures = items.iter().filter(|i| i.error().is_some()).count();
    tracing::info!(
        tickers = items.len(),
        failures,
        portfolio_pct = ?portfolio,
        weighted = universe.weights.is_some(),
        "snapshot run assembled"
    );

    RunReport {
        generated_at_utc: iso_utc(now()),
        tickers: universe.tickers.clone(),
        portfolio_pct: portfolio,
        threshold_pct: THRESHOLD_PCT,
        items,
    }
}

pub async fn snapshot_ticker(market: &dyn MarketDataProvider, ticker: &str) -> TickerSnapshot {
    let snapshot = match market.fetch_intraday_series(ticker).await {
        Ok(candles) => summarize_candles(ticker, &candles),
        Err(err) => TickerSnapshot::failed(ticker, format!("intraday fetch failed: {err:#}")),
    };

    match snapshot.error() {
        Some(error) => tracing::warn!(
            ticker,
            provider = market.provider_name(),
            error,
            "ticker snapshot failed"
        ),
        None => tracing::info!(
            ticker,
            open = ?snapshot.open(),
            last = ?snapshot.last(),
            pct = ?snapshot.pct(),
            "ticker snapshot"
        ),
    }

    snapshot
}

/// Reduces a day of bars to open-of-first / close-of-last.
pub fn summarize_candles(ticker: &str, candles: &[Candle]) -> TickerSnapshot {
    if candles.is_empty() {
        return TickerSnapshot::failed(ticker, NO_DATA);
    }

    let valid: Vec<&Candle> = candles.iter().filter(|c| c.is_complete()).collect();
    let (Some(first), Some(last)) = (valid.first(), valid.last()) else {
        return TickerSnapshot::failed(ticker, NO_VALID_CANDLES);
    };

    let (Some(open), Some(close)) = (first.open, last.close) else {
        return TickerSnapshot::failed(ticker, NO_VALID_CANDLES);
    };

    TickerSnapshot::priced(
        ticker,
        IntradayQuote {
            open,
            last: close,
            pct: pct_change(Some(open), Some(close)),
            last_timestamp_utc: relabel_as_utc(last.timestamp),
        },
    )
}

pub fn meets_threshold(pct: Option<f64>) -> bool {
    pct.is_some_and(|p| p.abs() >= THRESHOLD_PCT)
}

/// News for one ticker. No query is issued below the threshold.
pub async fn news_for(news: &dyn NewsProvider, ticker: &str, pct: Option<f64>) -> Vec<NewsItem> {
    if !meets_threshold(pct) {
        tracing::debug!(ticker, pct = ?pct, "below news threshold; skipping");
        return Vec::new();
    }

    let query = NewsQuery::new(ticker)
        .with_hours_back(NEWS_WINDOW_HOURS)
        .with_max_results(NEWS_MAX_RESULTS);

    match news.search_news(&query).await {
        Ok(articles) => select_articles(articles, NEWS_MAX_RESULTS),
        Err(err) => {
            tracing::warn!(
                ticker,
                provider = news.provider_name(),
                error = %err,
                "news search failed"
            );
            vec![NewsItem::Failed {
                error: format!("news search failed: {err:#}"),
            }]
        }
    }
}

/// Newest first by `seendate` (undated hits last, ties keep provider order),
/// truncated to `max`.
pub fn select_articles(mut articles: Vec<RawArticle>, max: usize) -> Vec<NewsItem> {
    articles.sort_by(|a, b| match (&a.seendate, &b.seendate) {
        (Some(x), Some(y)) => y.cmp(x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });

    articles
        .into_iter()
        .take(max)
        .map(|a| {
            NewsItem::Article(NewsArticle {
                title: a.title.unwrap_or_default(),
                url: a.url.unwrap_or_default(),
                seendate: a.seendate.unwrap_or_default(),
                domain: a.domain.unwrap_or_default(),
            })
        })
        .collect()
}
