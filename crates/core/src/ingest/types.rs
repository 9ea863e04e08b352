use chrono::NaiveDateTime;
use serde::Deserialize;

/// One intraday bar as the market-data provider reports it.
///
/// `timestamp` is the provider's own wall-clock label for the bar and carries
/// no timezone.
#[derive(Debug, Clone, PartialEq)]
pub struct Candle {
    pub timestamp: NaiveDateTime,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<f64>,
}

impl Candle {
    /// A bar survives cleaning only when every field is present and finite.
    pub fn is_complete(&self) -> bool {
        [self.open, self.high, self.low, self.close, self.volume]
            .iter()
            .all(|v| v.is_some_and(f64::is_finite))
    }
}

/// A news search hit; the provider may omit any column.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawArticle {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub seendate: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
}

pub const DEFAULT_NEWS_LOOKBACK_HOURS: u32 = 48;
pub const DEFAULT_NEWS_MAX_RESULTS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsQuery {
    pub keyword: String,
    pub hours_back: u32,
    pub max_results: usize,
}

impl NewsQuery {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            hours_back: DEFAULT_NEWS_LOOKBACK_HOURS,
            max_results: DEFAULT_NEWS_MAX_RESULTS,
        }
    }

    pub fn with_hours_back(mut self, hours: u32) -> Self {
        self.hours_back = hours;
        self
    }

    pub fn with_max_results(mut self, n: usize) -> Self {
        self.max_results = n;
        self
    }
}
