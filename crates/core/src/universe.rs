/// Tickers used when `TICKERS` is unset or yields no symbols.
pub const DEFAULT_TICKERS: [&str; 4] = ["NTSK", "KLAR", "FIG", "NAVN"];

/// The resolved set of tickers for one run, plus normalized weights when the
/// operator supplied a usable `WEIGHTS` list.
#[derive(Debug, Clone, PartialEq)]
pub struct Universe {
    pub tickers: Vec<String>,

    /// Same length as `tickers`, summing to 1.0.
    pub weights: Option<Vec<f64>>,
}

impl Universe {
    pub fn resolve(
        tickers_raw: Option<&str>,
        weights_raw: Option<&str>,
        default_tickers: &[&str],
    ) -> Self {
        let mut tickers = parse_tickers(tickers_raw.unwrap_or(""));
        if tickers.is_empty() {
            tickers = default_tickers.iter().map(|t| t.to_string()).collect();
        }

        let weights = weights_raw.and_then(|raw| parse_weights(raw, tickers.len()));

        Self { tickers, weights }
    }

    pub fn from_settings(settings: &crate::config::Settings) -> Self {
        Self::resolve(
            settings.tickers.as_deref(),
            settings.weights.as_deref(),
            &DEFAULT_TICKERS,
        )
    }
}

fn parse_tickers(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|t| t.trim().to_uppercase())
        .filter(|t| !t.is_empty())
        .collect()
}

// Bad input is discarded silently; callers fall back to an unweighted mean.
fn parse_weights(raw: &str, expected: usize) -> Option<Vec<f64>> {
    if raw.trim().is_empty() {
        return None;
    }

    let mut parsed = Vec::new();
    for part in raw.split(',') {
        parsed.push(part.trim().parse::<f64>().ok()?);
    }

    if parsed.len() != expected {
        return None;
    }

    let sum: f64 = parsed.iter().sum();
    if !(sum > 0.0) {
        return None;
    }

    Some(parsed.into_iter().map(|w| w / sum).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULTS: [&str; 2] = ["AAA", "BBB"];

    #[test]
    fn normalizes_ticker_list() {
        let u = Universe::resolve(Some(" msft, ,aapl ,,nvda "), None, &DEFAULTS);
        assert_eq!(u.tickers, vec!["MSFT", "AAPL", "NVDA"]);
        assert!(u.weights.is_none());
    }

    #[test]
    fn falls_back_to_defaults_when_no_symbols() {
        assert_eq!(Universe::resolve(None, None, &DEFAULTS).tickers, vec!["AAA", "BBB"]);
        assert_eq!(Universe::resolve(Some(" , ,"), None, &DEFAULTS).tickers, vec!["AAA", "BBB"]);
    }

    #[test]
    fn production_defaults_have_four_tickers() {
        let u = Universe::resolve(Some(""), None, &DEFAULT_TICKERS);
        assert_eq!(u.tickers, vec!["NTSK", "KLAR", "FIG", "NAVN"]);
    }

    #[test]
    fn normalizes_weights_by_sum() {
        let u = Universe::resolve(Some("a,b,c"), Some("2, 1, 1"), &DEFAULTS);
        let w = u.weights.unwrap();
        assert_eq!(w, vec![0.5, 0.25, 0.25]);
    }

    #[test]
    fn discards_weights_with_count_mismatch() {
        let u = Universe::resolve(Some("a,b,c"), Some("1,1"), &DEFAULTS);
        assert!(u.weights.is_none());
    }

    #[test]
    fn discards_unparsable_or_non_positive_weights() {
        for raw in ["1,x,1", "1,,1", "0,0,0", "-1,0.5,0.5", "   ", "NaN,1,1"] {
            let u = Universe::resolve(Some("a,b,c"), Some(raw), &DEFAULTS);
            assert!(u.weights.is_none(), "weights {raw:?} should be discarded");
        }
    }

    #[test]
    fn allows_negative_entries_with_positive_sum() {
        let u = Universe::resolve(Some("a,b"), Some("3,-1"), &DEFAULTS);
        assert_eq!(u.weights, Some(vec![1.5, -0.5]));
    }

    #[test]
    fn weights_are_checked_against_default_tickers() {
        let u = Universe::resolve(None, Some("1,3"), &DEFAULTS);
        assert_eq!(u.tickers.len(), 2);
        assert_eq!(u.weights, Some(vec![0.25, 0.75]));
    }
}
