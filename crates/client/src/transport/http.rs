//! reqwest client for the incident JSON API.

use atxtraffic::Description;
use atxtraffic_server::protocol::{
    ColumnsResponse, ErrorBody, HourRangeResponse, InfoResponse, NearbyResponse,
    RushHourResponse, ShapeResponse, UniqueValuesResponse, ValueAndYearResponse,
};
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

/// One incident as returned by the service: column name to JSON cell.
pub type Incident = serde_json::Map<String, serde_json::Value>;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Server error ({status}): {message}")]
    Server { status: StatusCode, message: String },
}

impl ClientError {
    /// HTTP status of a server-side rejection.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Server { status, .. } => Some(*status),
            ClientError::Request(err) => err.status(),
            ClientError::InvalidUrl { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Clone)]
pub struct TrafficClient {
    http: Client,
    base_url: Url,
}

impl TrafficClient {
    /// Client for the service rooted at `base_url`, e.g. `http://127.0.0.1:8052`.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(Client::new(), base_url)
    }

    /// Like [`TrafficClient::new`] with a preconfigured reqwest client
    /// (timeouts, proxies).
    pub fn with_client(http: Client, base_url: &str) -> Result<Self> {
        let invalid = |reason: String| ClientError::InvalidUrl {
            url: base_url.to_string(),
            reason,
        };

        let mut url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if url.cannot_be_a_base() {
            return Err(invalid("not a base URL".to_string()));
        }
        // Endpoint names are joined relative to the base path.
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(Self {
            http,
            base_url: url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str, query: &[(&str, String)]) -> Result<T> {
        let url = self
            .base_url
            .join(endpoint)
            .map_err(|e| ClientError::InvalidUrl {
                url: format!("{}{}", self.base_url, endpoint),
                reason: e.to_string(),
            })?;
        debug!("GET {} {:?}", url, query);

        let mut request = self.http.get(url);
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = request.send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unexpected response")
                .to_string(),
        };
        Err(ClientError::Server { status, message })
    }

    /// First rows of the dataset (the service's default preview).
    pub async fn preview(&self) -> Result<Vec<Incident>> {
        self.get("", &[]).await
    }

    pub async fn head(&self, count: usize) -> Result<Vec<Incident>> {
        self.get("head", &[("count", count.to_string())]).await
    }

    pub async fn shape(&self) -> Result<ShapeResponse> {
        self.get("shape", &[]).await
    }

    pub async fn columns(&self) -> Result<Vec<String>> {
        let body: ColumnsResponse = self.get("columns", &[]).await?;
        Ok(body.columns)
    }

    pub async fn info(&self) -> Result<String> {
        let body: InfoResponse = self.get("info", &[]).await?;
        Ok(body.info)
    }

    pub async fn describe(&self) -> Result<Description> {
        self.get("describe", &[]).await
    }

    pub async fn unique_values(
        &self,
        column: &str,
    ) -> Result<UniqueValuesResponse<serde_json::Value>> {
        self.get("UniqueValues", &[("ColumnName", column.to_string())])
            .await
    }

    pub async fn filter_by_value_and_year(
        &self,
        column: &str,
        value: &str,
        year: i64,
    ) -> Result<ValueAndYearResponse<Incident>> {
        self.get(
            "FilterByValueAndYear",
            &[
                ("ColumnName", column.to_string()),
                ("ColumnValue", value.to_string()),
                ("Year", year.to_string()),
            ],
        )
        .await
    }

    pub async fn by_hour_range(
        &self,
        start_hour: i64,
        end_hour: i64,
    ) -> Result<HourRangeResponse<Incident>> {
        self.get(
            "ByHourRange",
            &[
                ("start_hour", start_hour.to_string()),
                ("end_hour", end_hour.to_string()),
            ],
        )
        .await
    }

    pub async fn nearby(&self, lat: f64, lon: f64) -> Result<NearbyResponse<Incident>> {
        self.get("Nearby", &[("lat", lat.to_string()), ("lon", lon.to_string())])
            .await
    }

    /// The server-side rush-hour query.
    pub async fn rush_hour(&self) -> Result<RushHourResponse<Incident>> {
        self.get("RushHourUT", &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_normalized() {
        let client = TrafficClient::new("http://127.0.0.1:8052").unwrap();
        assert_eq!(client.base_url().as_str(), "http://127.0.0.1:8052/");
        assert_eq!(
            client.base_url().join("shape").unwrap().as_str(),
            "http://127.0.0.1:8052/shape"
        );

        let client = TrafficClient::new("http://example.com/traffic").unwrap();
        assert_eq!(
            client.base_url().join("Nearby").unwrap().as_str(),
            "http://example.com/traffic/Nearby"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            TrafficClient::new("not a url"),
            Err(ClientError::InvalidUrl { .. })
        ));
        assert!(matches!(
            TrafficClient::new("mailto:ops@example.com"),
            Err(ClientError::InvalidUrl { .. })
        ));
    }
}
