use atxtraffic::{Config, Dataset};
use atxtraffic_client::{ClientError, Incident, TrafficClient, rush_hour_near};
use atxtraffic_server::run_server;
use reqwest::StatusCode;
use serde_json::json;
use std::sync::Arc;

const INCIDENTS: &str = "\
Traffic Report ID,Published Date,Issue Reported,Latitude,Longitude,Agency
R1,2024-01-10 08:15:00,Crash Urgent,30.29,-97.74,AUSTIN PD
R2,2023-01-10 08:15:00,Crash Urgent,30.29,-97.74,AUSTIN PD
R3,2024-03-05 12:30:00,Stalled Vehicle,30.1975,-97.6664,TRAVIS COUNTY SHERIFF
R4,2024-07-04 17:05:00,Traffic Hazard,30.2880,-97.7350,AUSTIN PD
R5,2024-07-04 17:45:00,Traffic Hazard,,,AUSTIN PD
";

async fn start_server() -> anyhow::Result<TrafficClient> {
    tracing_subscriber::fmt::try_init().ok();
    let dataset = Arc::new(Dataset::builder().reader(INCIDENTS.as_bytes()).build()?);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let bound_addr = listener.local_addr()?;
    tokio::spawn(run_server(listener, dataset, std::future::pending()));

    Ok(TrafficClient::new(&format!("http://{}", bound_addr))?)
}

fn ids(rows: &[Incident]) -> Vec<&str> {
    rows.iter()
        .map(|row| row["Traffic Report ID"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_schema_calls() -> anyhow::Result<()> {
    let client = start_server().await?;

    let shape = client.shape().await?;
    assert_eq!((shape.rows, shape.columns), (5, 6));

    let columns = client.columns().await?;
    assert_eq!(columns.first().map(String::as_str), Some("Traffic Report ID"));
    assert_eq!(columns.len(), 6);

    assert_eq!(ids(&client.preview().await?), vec!["R1", "R2", "R3", "R4", "R5"]);
    assert_eq!(ids(&client.head(2).await?), vec!["R1", "R2"]);
    assert!(client.head(0).await?.is_empty());

    assert!(client.info().await?.contains("RangeIndex: 5 entries"));

    let desc = client.describe().await?;
    let names: Vec<&str> = desc.columns.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["Latitude", "Longitude"]);
    assert_eq!(desc.get("Latitude").unwrap().count, 4);
    Ok(())
}

#[tokio::test]
async fn test_query_calls() -> anyhow::Result<()> {
    let client = start_server().await?;

    let unique = client.unique_values("Agency").await?;
    assert_eq!(unique.unique_count, 2);
    assert_eq!(
        unique.unique_values,
        vec![json!("AUSTIN PD"), json!("TRAVIS COUNTY SHERIFF")]
    );

    let found = client
        .filter_by_value_and_year("Issue Reported", "Crash Urgent", 2024)
        .await?;
    assert_eq!(found.match_count, 1);
    assert_eq!(ids(&found.matching_incidents), vec!["R1"]);

    let morning = client.by_hour_range(7, 9).await?;
    assert_eq!(morning.match_count, 2);
    assert_eq!(ids(&morning.matching_incidents), vec!["R1", "R2"]);

    let near = client.nearby(30.2895, -97.7368).await?;
    assert_eq!(near.latitude, 30.2895);
    assert_eq!(ids(&near.matching_incidents), vec!["R1", "R2", "R4"]);

    let rush = client.rush_hour().await?;
    assert_eq!(rush.total_matches, 2);
    assert_eq!(ids(&rush.sample), vec!["R1", "R4"]);
    Ok(())
}

#[tokio::test]
async fn test_server_errors_surface() -> anyhow::Result<()> {
    let client = start_server().await?;

    let err = client.unique_values("Nonexistent").await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    match err {
        ClientError::Server { message, .. } => {
            assert_eq!(message, "Column 'Nonexistent' not found in the dataset.")
        }
        other => panic!("unexpected error: {other}"),
    }

    let err = client.by_hour_range(7, 24).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));

    let err = client.nearby(95.0, -97.7368).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    Ok(())
}

#[tokio::test]
async fn test_rush_hour_composition_agrees_with_server() -> anyhow::Result<()> {
    let client = start_server().await?;

    let report = rush_hour_near(&client, &Config::default()).await?;
    assert_eq!(
        report.per_hour,
        vec![(7, 0), (8, 2), (9, 0), (16, 0), (17, 2), (18, 0)]
    );
    assert_eq!(report.rush_incidents, 4);
    // R2 is from 2023
    assert_eq!(report.in_year, 3);
    // R5 has no coordinates
    assert_eq!(ids(&report.matches), vec!["R1", "R4"]);

    let server_side = client.rush_hour().await?;
    assert_eq!(ids(&report.matches), ids(&server_side.sample));
    Ok(())
}

#[tokio::test]
async fn test_unreachable_server() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let closed_addr = listener.local_addr().unwrap();
    drop(listener);

    let client = TrafficClient::new(&format!("http://{}", closed_addr)).unwrap();
    let err = client.shape().await.unwrap_err();
    assert!(matches!(err, ClientError::Request(_)));
    assert_eq!(err.status(), None);
}
