use anyhow::Context;
use chrono::Utc;
use marketlink::engine::{DashboardFilter, MarketFilter};
use marketlink::{AppState, BundledSource, Config, FixtureSource, SeedSource};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    let config = Config::from_env().context("Configuration error")?;

    let source: Box<dyn SeedSource> = match &config.seed_file {
        Some(path) => {
            let mut fixture = FixtureSource::new(path);
            if let Some(prices) = &config.prices_file {
                fixture = fixture.with_prices(prices);
            }
            Box::new(fixture)
        }
        None => Box::new(BundledSource),
    };

    let state = AppState::bootstrap(source.as_ref(), config, Utc::now())
        .context("Failed to seed application state")?;

    if let Some(market) = state.featured_market() {
        tracing::info!(market = %market.name, "Dashboard");
    }
    for card in state.dashboard(&DashboardFilter::default()) {
        tracing::info!(
            commodity = %card.commodity.name,
            unit = %card.commodity.unit,
            price = %card.latest.price_per_unit,
            change = %card.change.percentage,
            direction = ?card.change.direction,
            "Latest price"
        );
    }

    for summary in state.find_markets(&MarketFilter::default()) {
        tracing::info!(
            market = %summary.market.name,
            state = %summary.market.state,
            commodities = summary.commodity_count,
            distance_km = summary.distance_km.unwrap_or(0.0),
            "Market"
        );
    }

    Ok(())
}
