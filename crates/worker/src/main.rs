use anyhow::Context;
use movers_core::config::{Settings, OUTPUT_PATH};
use movers_core::ingest::gdelt::GdeltDocClient;
use movers_core::ingest::provider::{MarketDataProvider, NewsProvider};
use movers_core::ingest::yahoo::YahooChartClient;
use movers_core::universe::Universe;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    if let Err(err) = run(&settings).await {
        sentry_anyhow::capture_anyhow(&err);
        tracing::error!(error = %err, "snapshot run failed");
        return Err(err);
    }
    Ok(())
}

async fn run(settings: &Settings) -> anyhow::Result<()> {
    let universe = Universe::from_settings(settings);
    tracing::info!(
        tickers = ?universe.tickers,
        weighted = universe.weights.is_some(),
        "snapshot run starting"
    );

    let market = YahooChartClient::from_settings(settings)?;
    let news = GdeltDocClient::from_settings(settings)?;
    tracing::debug!(
        market = market.provider_name(),
        news = news.provider_name(),
        "providers ready"
    );

    let report =
        movers_core::pipeline::build_report(&universe, &market, &news, chrono::Utc::now).await;

    movers_core::storage::report_file::write_report(OUTPUT_PATH, &report)
        .with_context(|| format!("failed to persist report for {} tickers", report.tickers.len()))?;

    tracing::info!(
        generated_at = %report.generated_at_utc,
        portfolio_pct = ?report.portfolio_pct,
        path = OUTPUT_PATH,
        "snapshot run complete"
    );
    Ok(())
}

fn init_sentry(settings: &Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
