use crate::domain::report::RunReport;
use anyhow::Context;
use std::path::Path;

/// Overwrites `path` with the pretty-printed report, creating the parent
/// directory when missing. Single writer assumed; no locking.
pub fn write_report(path: impl AsRef<Path>, report: &RunReport) -> anyhow::Result<()> {
    let path = path.as_ref();

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory {}", dir.display()))?;
    }

    let body = serde_json::to_string_pretty(report).context("failed to serialize run report")?;
    std::fs::write(path, body)
        .with_context(|| format!("failed to write run report to {}", path.display()))?;

    tracing::info!(path = %path.display(), items = report.items.len(), "run report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::{IntradayQuote, NewsItem, TickerSnapshot};
    use tempfile::TempDir;

    fn report(generated_at: &str) -> RunReport {
        let mut priced = TickerSnapshot::priced(
            "AAA",
            IntradayQuote {
                open: 10.0,
                last: 11.0,
                pct: Some(10.0),
                last_timestamp_utc: "2026-01-05T15:55:00+00:00".to_string(),
            },
        );
        priced.news.push(NewsItem::Failed {
            error: "news search failed: Falha ao buscar notícias".to_string(),
        });

        RunReport {
            generated_at_utc: generated_at.to_string(),
            tickers: vec!["AAA".to_string(), "BBB".to_string()],
            portfolio_pct: Some(10.0),
            threshold_pct: 5.0,
            items: vec![priced, TickerSnapshot::failed("BBB", "no data")],
        }
    }

    #[test]
    fn creates_directory_and_writes_indented_utf8() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("data").join("latest.json");

        write_report(&path, &report("2026-01-05T21:00:00+00:00")).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("{\n  \"generated_at_utc\""));
        assert!(text.contains("notícias"));

        let back: RunReport = serde_json::from_str(&text).unwrap();
        assert_eq!(back, report("2026-01-05T21:00:00+00:00"));
    }

    #[test]
    fn overwrites_previous_report() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("latest.json");

        write_report(&path, &report("2026-01-05T14:00:00+00:00")).unwrap();
        let mut smaller = report("2026-01-05T15:00:00+00:00");
        smaller.items.truncate(1);
        smaller.tickers.truncate(1);
        write_report(&path, &smaller).unwrap();

        let back: RunReport =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, smaller);
    }

    #[test]
    fn unwritable_target_propagates() {
        let tmp = TempDir::new().unwrap();
        // A regular file where the directory should be.
        let blocker = tmp.path().join("data");
        std::fs::write(&blocker, "x").unwrap();

        let err = write_report(blocker.join("latest.json"), &report("t")).unwrap_err();
        assert!(format!("{err:#}").contains("failed to create output directory"));
    }
}
