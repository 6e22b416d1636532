//! Rush-hour incidents near UT Austin, assembled from a running service.
//!
//! ```text
//! cargo run -p atxtraffic-client --example rush_hour_consumer -- --url http://127.0.0.1:8052
//! ```

use atxtraffic::Config;
use atxtraffic_client::{TrafficClient, rush_hour_near};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Base URL of the atxtraffic service
    #[arg(long, default_value = "http://127.0.0.1:8052")]
    url: String,

    /// Year to keep
    #[arg(long)]
    year: Option<i32>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "atxtraffic_client=info,warn".into()),
        )
        .init();

    let args = Args::parse();
    let mut config = Config::default();
    if let Some(year) = args.year {
        config.rush_hour.year = year;
    }

    println!("Requesting rush hour incidents from {}...", args.url);
    let client = TrafficClient::new(&args.url)?;
    let report = rush_hour_near(&client, &config).await?;

    for (hour, count) in &report.per_hour {
        println!("Hour {}: {} incidents", hour, count);
    }
    println!("Total rush hour incidents: {}", report.rush_incidents);
    println!("Incidents from {} only: {}", config.rush_hour.year, report.in_year);
    println!(
        "Incidents during rush hour in {} within {} m of ({}, {}): {}",
        config.rush_hour.year,
        config.proximity_radius_meters,
        config.rush_hour.latitude,
        config.rush_hour.longitude,
        report.matches.len()
    );

    match report.matches.first() {
        Some(sample) => println!("Sample incident:\n{}", serde_json::to_string_pretty(sample)?),
        None => println!("No matching incidents found."),
    }
    Ok(())
}
