use serde::{Deserialize, Serialize};

/// Absolute percent move at or above which a ticker gets news enrichment.
pub const THRESHOLD_PCT: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub generated_at_utc: String,
    pub tickers: Vec<String>,
    pub portfolio_pct: Option<f64>,
    pub threshold_pct: f64,
    pub items: Vec<TickerSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerSnapshot {
    pub ticker: String,
    #[serde(flatten)]
    pub quote: QuoteOutcome,
    #[serde(default)]
    pub news: Vec<NewsItem>,
}

/// Either a usable open/last pair or the reason none could be produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuoteOutcome {
    Priced(IntradayQuote),
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntradayQuote {
    pub open: f64,
    pub last: f64,
    pub pct: Option<f64>,
    pub last_timestamp_utc: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NewsItem {
    Article(NewsArticle),
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    pub url: String,
    pub seendate: String,
    pub domain: String,
}

impl TickerSnapshot {
    pub fn priced(ticker: impl Into<String>, quote: IntradayQuote) -> Self {
        Self {
            ticker: ticker.into(),
            quote: QuoteOutcome::Priced(quote),
            news: Vec::new(),
        }
    }

    pub fn failed(ticker: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            quote: QuoteOutcome::Failed {
                error: error.into(),
            },
            news: Vec::new(),
        }
    }

    pub fn open(&self) -> Option<f64> {
        match &self.quote {
            QuoteOutcome::Priced(q) => Some(q.open),
            QuoteOutcome::Failed { .. } => None,
        }
    }

    pub fn last(&self) -> Option<f64> {
        match &self.quote {
            QuoteOutcome::Priced(q) => Some(q.last),
            QuoteOutcome::Failed { .. } => None,
        }
    }

    pub fn pct(&self) -> Option<f64> {
        match &self.quote {
            QuoteOutcome::Priced(q) => q.pct,
            QuoteOutcome::Failed { .. } => None,
        }
    }

    pub fn last_timestamp_utc(&self) -> Option<&str> {
        match &self.quote {
            QuoteOutcome::Priced(q) => Some(q.last_timestamp_utc.as_str()),
            QuoteOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.quote {
            QuoteOutcome::Priced(_) => None,
            QuoteOutcome::Failed { error } => Some(error.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn priced_snapshot_serializes_flat_with_null_pct() {
        let mut snap = TickerSnapshot::priced(
            "AAA",
            IntradayQuote {
                open: 0.0,
                last: 1.5,
                pct: None,
                last_timestamp_utc: "2026-01-05T20:55:00+00:00".to_string(),
            },
        );
        snap.news.push(NewsItem::Article(NewsArticle {
            title: "t".to_string(),
            url: "https://example.com/a".to_string(),
            seendate: "20260105T120000Z".to_string(),
            domain: "example.com".to_string(),
        }));

        let v = serde_json::to_value(&snap).unwrap();
        assert_eq!(
            v,
            json!({
                "ticker": "AAA",
                "open": 0.0,
                "last": 1.5,
                "pct": null,
                "last_timestamp_utc": "2026-01-05T20:55:00+00:00",
                "news": [{
                    "title": "t",
                    "url": "https://example.com/a",
                    "seendate": "20260105T120000Z",
                    "domain": "example.com"
                }]
            })
        );
    }

    #[test]
    fn failed_snapshot_omits_price_fields() {
        let snap = TickerSnapshot::failed("BBB", "no valid candles after cleaning");
        let v = serde_json::to_value(&snap).unwrap();
        assert_eq!(
            v,
            json!({"ticker": "BBB", "error": "no valid candles after cleaning", "news": []})
        );
        assert_eq!(snap.pct(), None);
        assert_eq!(snap.open(), None);
        assert_eq!(snap.last_timestamp_utc(), None);
        assert_eq!(snap.error(), Some("no valid candles after cleaning"));
    }

    #[test]
    fn news_error_entry_is_a_bare_error_object() {
        let v = serde_json::to_value(NewsItem::Failed {
            error: "news search failed: boom".to_string(),
        })
        .unwrap();
        assert_eq!(v, json!({"error": "news search failed: boom"}));
    }

    #[test]
    fn report_reads_back_from_json() {
        let v = json!({
            "generated_at_utc": "2026-01-05T21:00:00+00:00",
            "tickers": ["AAA", "BBB"],
            "portfolio_pct": 10.0,
            "threshold_pct": 5.0,
            "items": [
                {"ticker": "AAA", "open": 10.0, "last": 11.0, "pct": 10.0,
                 "last_timestamp_utc": "2026-01-05T15:55:00+00:00", "news": [{"error": "x"}]},
                {"ticker": "BBB", "error": "no data", "news": []}
            ]
        });

        let report: RunReport = serde_json::from_value(v).unwrap();
        assert_eq!(report.items[0].pct(), Some(10.0));
        assert_eq!(report.items[0].news, vec![NewsItem::Failed { error: "x".to_string() }]);
        assert_eq!(report.items[1].error(), Some("no data"));
    }
}
