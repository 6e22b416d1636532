use atxtraffic::Dataset;
use atxtraffic_server::{router, run_server};
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tower::ServiceExt;

const INCIDENTS: &str = "\
Traffic Report ID,Published Date,Issue Reported,Latitude,Longitude,Agency
R1,2024-01-10 08:15:00,Crash Urgent,30.29,-97.74,AUSTIN PD
R2,2023-01-10 08:15:00,Crash Urgent,30.29,-97.74,AUSTIN PD
R3,2024-03-05 12:30:00,Stalled Vehicle,30.1975,-97.6664,TRAVIS COUNTY SHERIFF
R4,2024-07-04 17:05:00,Traffic Hazard,30.2880,-97.7350,AUSTIN PD
R5,2024-07-04 17:45:00,Traffic Hazard,,,AUSTIN PD
";

fn app_from(csv: &'static str) -> Router {
    let dataset = Dataset::builder().reader(csv.as_bytes()).build().unwrap();
    router(Arc::new(dataset))
}

fn app() -> Router {
    app_from(INCIDENTS)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn ids(rows: &Value) -> Vec<&str> {
    rows.as_array()
        .unwrap()
        .iter()
        .map(|row| row["Traffic Report ID"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_index_and_head() {
    let (status, body) = get(app(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec!["R1", "R2", "R3", "R4", "R5"]);
    assert_eq!(body[4]["Latitude"], Value::Null);
    assert_eq!(body[0]["Latitude"], json!(30.29));

    let (status, body) = get(app(), "/head?count=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec!["R1", "R2"]);

    let (status, body) = get(app(), "/head?count=100").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec!["R1", "R2", "R3", "R4", "R5"]);

    let (status, body) = get(app(), "/head?count=0").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_head_rejects_bad_count() {
    for uri in ["/head", "/head?count=", "/head?count=abc", "/head?count=-1"] {
        let (status, body) = get(app(), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert!(body["error"].is_string(), "{}", uri);
    }
}

#[tokio::test]
async fn test_schema_endpoints() {
    let (status, body) = get(app(), "/shape").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"rows": 5, "columns": 6}));

    let (_, body) = get(app(), "/columns").await;
    assert_eq!(
        body,
        json!({"columns": [
            "Traffic Report ID",
            "Published Date",
            "Issue Reported",
            "Latitude",
            "Longitude",
            "Agency"
        ]})
    );

    let (status, body) = get(app(), "/info").await;
    assert_eq!(status, StatusCode::OK);
    let info = body["info"].as_str().unwrap();
    assert!(info.contains("RangeIndex: 5 entries"));
    assert!(info.contains("Agency"));

    let (status, body) = get(app(), "/describe").await;
    assert_eq!(status, StatusCode::OK);
    let described: Vec<&str> = body.as_object().unwrap().keys().map(|k| k.as_str()).collect();
    assert_eq!(described.len(), 2);
    assert!(described.contains(&"Latitude"));
    assert!(described.contains(&"Longitude"));
    assert_eq!(body["Latitude"]["count"], json!(4));
    assert_eq!(body["Latitude"]["max"], json!(30.29));
}

#[tokio::test]
async fn test_unique_values() {
    let (status, body) = get(app(), "/UniqueValues?ColumnName=Agency").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "column": "Agency",
            "unique_count": 2,
            "unique_values": ["AUSTIN PD", "TRAVIS COUNTY SHERIFF"]
        })
    );

    let (status, body) = get(app(), "/UniqueValues").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Please provide a ColumnName parameter."}));

    let (status, body) = get(app(), "/UniqueValues?ColumnName=Nonexistent").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({"error": "Column 'Nonexistent' not found in the dataset."})
    );
}

#[tokio::test]
async fn test_filter_by_value_and_year() {
    let (status, body) = get(
        app(),
        "/FilterByValueAndYear?ColumnName=Issue%20Reported&ColumnValue=Crash%20Urgent&Year=2024",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["column"], json!("Issue Reported"));
    assert_eq!(body["value"], json!("Crash Urgent"));
    assert_eq!(body["year"], json!(2024));
    assert_eq!(body["match_count"], json!(1));
    assert_eq!(ids(&body["matching_incidents"]), vec!["R1"]);

    let (status, _) = get(
        app(),
        "/FilterByValueAndYear?ColumnName=Agency&ColumnValue=AUSTIN+PD&Year=twenty",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get(app(), "/FilterByValueAndYear?ColumnName=Agency&Year=2024").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get(
        app(),
        "/FilterByValueAndYear?ColumnName=Nonexistent&ColumnValue=x&Year=2024",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_by_hour_range() {
    let app = app_from(
        "Traffic Report ID,Published Date\n\
         H1,2024-01-10 08:15:00\n\
         H2,2024-01-10 12:00:00\n",
    );
    let (status, body) = get(app, "/ByHourRange?start_hour=7&end_hour=9").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["start_hour"], json!(7));
    assert_eq!(body["end_hour"], json!(9));
    assert_eq!(body["match_count"], json!(1));
    assert_eq!(ids(&body["matching_incidents"]), vec!["H1"]);

    let (_, body) = get(app_from(INCIDENTS), "/ByHourRange?start_hour=9&end_hour=7").await;
    assert_eq!(body["match_count"], json!(0));

    for uri in [
        "/ByHourRange?start_hour=7",
        "/ByHourRange?start_hour=seven&end_hour=9",
        "/ByHourRange?start_hour=7&end_hour=24",
    ] {
        let (status, _) = get(app_from(INCIDENTS), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
    }
}

#[tokio::test]
async fn test_nearby() {
    let (status, body) = get(app(), "/Nearby?lat=30.2895&lon=-97.7368").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["latitude"], json!(30.2895));
    assert_eq!(body["longitude"], json!(-97.7368));
    assert_eq!(body["match_count"], json!(3));
    assert_eq!(ids(&body["matching_incidents"]), vec!["R1", "R2", "R4"]);

    let (status, _) = get(app(), "/Nearby?lat=north&lon=-97.7368").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get(app(), "/Nearby?lat=95.0&lon=-97.7368").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let no_coords = app_from("Published Date,Status\n2024-01-10 08:15:00,ACTIVE\n");
    let (status, body) = get(no_coords, "/Nearby?lat=30.2895&lon=-97.7368").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"error": "Dataset is missing required column(s): Latitude, Longitude"})
    );
}

#[tokio::test]
async fn test_rush_hour() {
    let (status, body) = get(app(), "/RushHourUT").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_matches"], json!(2));
    assert_eq!(ids(&body["sample"]), vec!["R1", "R4"]);

    let app = app_from(
        "Traffic Report ID,Published Date,Latitude,Longitude\n\
         U1,2024-01-10 08:15:00,30.29,-97.74\n\
         U2,2023-01-10 08:15:00,30.29,-97.74\n",
    );
    let (_, body) = get(app, "/RushHourUT").await;
    assert_eq!(ids(&body["sample"]), vec!["U1"]);
}

#[tokio::test]
async fn test_unknown_path() {
    let (status, body) = get(app(), "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Not found"}));
}

#[tokio::test]
async fn test_served_over_tcp() -> anyhow::Result<()> {
    tracing_subscriber::fmt::try_init().ok();
    let dataset = Arc::new(Dataset::builder().reader(INCIDENTS.as_bytes()).build()?);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let server = tokio::spawn(run_server(listener, dataset, async move {
        let _ = stop_rx.await;
    }));

    let mut stream = tokio::net::TcpStream::connect(addr).await?;
    stream
        .write_all(b"GET /shape HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .await?;
    let mut response = String::new();
    stream.read_to_string(&mut response).await?;

    assert!(response.starts_with("HTTP/1.1 200 OK"));
    assert!(response.contains("application/json"));
    assert!(response.ends_with(r#"{"rows":5,"columns":6}"#));

    let _ = stop_tx.send(());
    server.await??;
    Ok(())
}
