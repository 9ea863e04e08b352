use chrono::{DateTime, Duration, NaiveDateTime, SecondsFormat, Utc};

/// `YYYY-MM-DDTHH:MM:SS[.ffffff]+00:00`; the fraction only appears when
/// there are microseconds to show.
pub fn iso_utc(at: DateTime<Utc>) -> String {
    let format = if at.timestamp_subsec_micros() == 0 {
        SecondsFormat::Secs
    } else {
        SecondsFormat::Micros
    };
    at.to_rfc3339_opts(format, false)
}

/// Attaches UTC to a provider timestamp as-is; no timezone conversion.
pub fn relabel_as_utc(ts: NaiveDateTime) -> String {
    iso_utc(ts.and_utc())
}

/// Date-granular search window ending today (UTC), formatted the way the
/// GDELT DOC API expects (`YYYYMMDDHHMMSS`).
pub fn news_date_window(now: DateTime<Utc>, hours_back: u32) -> (String, String) {
    let start = (now - Duration::hours(i64::from(hours_back))).date_naive();
    let end = now.date_naive();
    (
        format!("{}000000", start.format("%Y%m%d")),
        // Last second of today, not midnight, so today's articles are in range.
        format!("{}235959", end.format("%Y%m%d")),
    )
}
