//! Rush-hour incidents near a point, assembled on the client.
//!
//! Asks `/ByHourRange` for each rush hour separately, keeps the incidents
//! published in the target year, and intersects them with `/Nearby` around
//! the target point. Every endpoint returns only its first matches, so the
//! result is a sample; `/RushHourUT` computes the exact total on the server.

use crate::transport::http::{Incident, Result, TrafficClient};
use atxtraffic::Config;
use atxtraffic::compute::temporal::hour_and_year;
use tracing::{debug, info};

/// Column identifying an incident together with its publication date.
pub const REPORT_ID_COLUMN: &str = "Traffic Report ID";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RushHourReport {
    /// Incidents returned per rush hour, in query order.
    pub per_hour: Vec<(u32, usize)>,
    /// All incidents returned across the rush hours.
    pub rush_incidents: usize,
    /// Of those, incidents published in the target year.
    pub in_year: usize,
    /// Nearby incidents that are also rush-hour incidents of the target year.
    pub matches: Vec<Incident>,
}

/// Run the rush-hour composition with the point, year and hour windows of
/// `config.rush_hour`, reading dates from `config.date_column`.
pub async fn rush_hour_near(client: &TrafficClient, config: &Config) -> Result<RushHourReport> {
    let rush = &config.rush_hour;
    let mut report = RushHourReport::default();
    let mut rush_records = Vec::new();

    for window in &rush.windows {
        for hour in window.start()..=window.end() {
            let found = client
                .by_hour_range(i64::from(hour), i64::from(hour))
                .await?;
            debug!("hour {}: {} incidents", hour, found.matching_incidents.len());
            report.per_hour.push((hour, found.matching_incidents.len()));
            rush_records.extend(found.matching_incidents);
        }
    }
    report.rush_incidents = rush_records.len();

    let in_year: Vec<Incident> = rush_records
        .into_iter()
        .filter(|record| published_year(record, &config.date_column) == Some(rush.year))
        .collect();
    report.in_year = in_year.len();

    let nearby = client.nearby(rush.latitude, rush.longitude).await?;
    report.matches = nearby
        .matching_incidents
        .into_iter()
        .filter(|incident| {
            in_year
                .iter()
                .any(|record| same_incident(record, incident, &config.date_column))
        })
        .collect();

    info!(
        "{} rush-hour incidents, {} in {}, {} within range of ({}, {})",
        report.rush_incidents,
        report.in_year,
        rush.year,
        report.matches.len(),
        rush.latitude,
        rush.longitude
    );
    Ok(report)
}

fn published_year(record: &Incident, date_column: &str) -> Option<i32> {
    let raw = record.get(date_column)?.as_str()?;
    hour_and_year(raw).map(|(_, year)| year)
}

fn incident_key<'a>(
    record: &'a Incident,
    date_column: &str,
) -> (Option<&'a serde_json::Value>, Option<&'a serde_json::Value>) {
    (record.get(REPORT_ID_COLUMN), record.get(date_column))
}

/// Same report ID and publication date.
fn same_incident(a: &Incident, b: &Incident, date_column: &str) -> bool {
    let (id, date) = incident_key(a, date_column);
    id.is_some() && date.is_some() && (id, date) == incident_key(b, date_column)
}
