//! Request handlers for the incident API.
//!
//! Schema endpoints answer inline; anything that scans rows runs on the
//! blocking pool so a full-table pass never stalls the async workers.

use crate::error::ApiError;
use crate::protocol::{
    ColumnsResponse, ErrorBody, HeadParams, HourRangeParams, HourRangeResponse, InfoResponse,
    NearbyParams, NearbyResponse, RushHourResponse, ShapeResponse, UniqueValuesParams,
    UniqueValuesResponse, ValueAndYearParams, ValueAndYearResponse, parse_float, parse_int,
    required,
};
use atxtraffic::{Dataset, Description, Row, TrafficError};
use axum::Json;
use axum::extract::{Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::IntoResponse;
use std::sync::Arc;
use tracing::debug;

pub type ApiResult<T> = Result<Json<T>, ApiError>;

/// Shared handler state: the loaded dataset.
#[derive(Clone)]
pub struct AppState {
    dataset: Arc<Dataset>,
}

impl AppState {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self { dataset }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    async fn run<T, F>(&self, query: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&Dataset) -> Result<T, TrafficError> + Send + 'static,
    {
        let dataset = Arc::clone(&self.dataset);
        let result = tokio::task::spawn_blocking(move || query(&dataset)).await?;
        Ok(result?)
    }
}

pub async fn index(State(state): State<AppState>) -> ApiResult<Vec<Row>> {
    debug!("index: preview of {} rows", state.dataset().config().sample_limit);
    let rows = state.run(|dataset| Ok(dataset.preview())).await?;
    Ok(Json(rows))
}

pub async fn head(
    State(state): State<AppState>,
    Query(params): Query<HeadParams>,
) -> ApiResult<Vec<Row>> {
    let raw = required("count", params.count)?;
    let count = parse_int("count", &raw)?;
    let count = usize::try_from(count).map_err(|_| {
        TrafficError::InvalidArgument(format!(
            "count must be a non-negative integer, got '{}'.",
            raw
        ))
    })?;
    debug!("head: count={}", count);
    let rows = state.run(move |dataset| Ok(dataset.head(count))).await?;
    Ok(Json(rows))
}

pub async fn shape(State(state): State<AppState>) -> Json<ShapeResponse> {
    let (rows, columns) = state.dataset().shape();
    Json(ShapeResponse { rows, columns })
}

pub async fn columns(State(state): State<AppState>) -> Json<ColumnsResponse> {
    Json(ColumnsResponse {
        columns: state.dataset().columns().to_vec(),
    })
}

pub async fn info(State(state): State<AppState>) -> ApiResult<InfoResponse> {
    let info = state.run(|dataset| Ok(dataset.info())).await?;
    Ok(Json(InfoResponse { info }))
}

pub async fn describe(State(state): State<AppState>) -> ApiResult<Description> {
    let description = state.run(|dataset| Ok(dataset.describe())).await?;
    Ok(Json(description))
}

pub async fn unique_values(
    State(state): State<AppState>,
    Query(params): Query<UniqueValuesParams>,
) -> ApiResult<UniqueValuesResponse> {
    let column = required("ColumnName", params.column_name)?;
    debug!("unique_values: column={}", column);
    let unique = state
        .run(move |dataset| dataset.unique_values(&column))
        .await?;
    Ok(Json(unique.into()))
}

pub async fn filter_by_value_and_year(
    State(state): State<AppState>,
    Query(params): Query<ValueAndYearParams>,
) -> ApiResult<ValueAndYearResponse> {
    let column = required("ColumnName", params.column_name)?;
    let value = required("ColumnValue", params.column_value)?;
    let year = parse_int("Year", &required("Year", params.year)?)?;
    debug!(
        "filter_by_value_and_year: column={} value={} year={}",
        column, value, year
    );

    let (query_column, query_value) = (column.clone(), value.clone());
    let matches = state
        .run(move |dataset| dataset.filter_by_value_and_year(&query_column, &query_value, year))
        .await?;

    Ok(Json(ValueAndYearResponse {
        column,
        value,
        year,
        match_count: matches.match_count,
        matching_incidents: matches.rows,
    }))
}

pub async fn by_hour_range(
    State(state): State<AppState>,
    Query(params): Query<HourRangeParams>,
) -> ApiResult<HourRangeResponse> {
    let start_hour = parse_int("start_hour", &required("start_hour", params.start_hour)?)?;
    let end_hour = parse_int("end_hour", &required("end_hour", params.end_hour)?)?;
    debug!("by_hour_range: {}..={}", start_hour, end_hour);

    let matches = state
        .run(move |dataset| dataset.filter_by_hour_range(start_hour, end_hour))
        .await?;

    Ok(Json(HourRangeResponse {
        start_hour,
        end_hour,
        match_count: matches.match_count,
        matching_incidents: matches.rows,
    }))
}

pub async fn nearby(
    State(state): State<AppState>,
    Query(params): Query<NearbyParams>,
) -> ApiResult<NearbyResponse> {
    let latitude = parse_float("lat", &required("lat", params.lat)?)?;
    let longitude = parse_float("lon", &required("lon", params.lon)?)?;
    debug!("nearby: ({}, {})", latitude, longitude);

    let matches = state
        .run(move |dataset| dataset.nearby(latitude, longitude))
        .await?;

    Ok(Json(NearbyResponse {
        latitude,
        longitude,
        match_count: matches.match_count,
        matching_incidents: matches.rows,
    }))
}

pub async fn rush_hour(State(state): State<AppState>) -> ApiResult<RushHourResponse> {
    let matches = state.run(|dataset| dataset.rush_hour_near_point()).await?;
    debug!("rush_hour: {} matches", matches.match_count);
    Ok(Json(matches.into()))
}

pub async fn not_found(uri: Uri) -> impl IntoResponse {
    debug!("no route for {}", uri.path());
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: "Not found".to_string(),
        }),
    )
}
