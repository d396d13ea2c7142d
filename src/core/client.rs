use crate::core::{ConfigProvider, SeriesQuery, SeriesResult, SeriesSource};
use crate::domain::model::value_to_display;
use crate::utils::error::{PullerError, Result};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

pub const BLS_API_URL: &str = "https://api.bls.gov/publicAPI/v2/timeseries/data/";
pub const SUCCESS_STATUS: &str = "REQUEST_SUCCEEDED";
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

/// BLS API 的請求內容，年份以字串傳送
#[derive(Debug, Serialize)]
struct TimeseriesRequest<'a> {
    seriesid: &'a [String],
    startyear: String,
    endyear: String,
    registrationkey: &'a str,
}

impl<'a> From<&'a SeriesQuery> for TimeseriesRequest<'a> {
    fn from(query: &'a SeriesQuery) -> Self {
        Self {
            seriesid: &query.series_ids,
            startyear: query.start_year.to_string(),
            endyear: query.end_year.to_string(),
            registrationkey: &query.registration_key,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BlsClient {
    endpoint: String,
    client: Client,
}

impl BlsClient {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            endpoint: config.api_endpoint().to_string(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl SeriesSource for BlsClient {
    async fn fetch(&self, query: &SeriesQuery) -> Result<Vec<SeriesResult>> {
        tracing::debug!(
            "Requesting {} series ({}-{}) from {}",
            query.series_ids.len(),
            query.start_year,
            query.end_year,
            self.endpoint
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(&TimeseriesRequest::from(query))
            .send()
            .await?
            .error_for_status()?;

        tracing::debug!("API response status: {}", response.status());

        let body = response.text().await?;
        let envelope: Value = serde_json::from_str(&body)?;
        let series = parse_envelope(envelope)?;

        tracing::info!("✅ Received {} series from API", series.len());
        Ok(series)
    }
}

/// 檢查回應的 status，成功時取出 `Results.series`
pub fn parse_envelope(mut envelope: Value) -> Result<Vec<SeriesResult>> {
    if envelope.get("status").and_then(Value::as_str) != Some(SUCCESS_STATUS) {
        let message = failure_message(&envelope);
        tracing::warn!("❌ API reported failure: {}", message);
        return Err(PullerError::Remote { message });
    }

    match envelope
        .get_mut("Results")
        .and_then(|results| results.get_mut("series"))
    {
        Some(series) if !series.is_null() => Ok(serde_json::from_value(series.take())?),
        _ => Ok(Vec::new()),
    }
}

fn failure_message(envelope: &Value) -> String {
    let messages: Vec<String> = match envelope.get("message") {
        Some(Value::Array(items)) => items.iter().map(value_to_display).collect(),
        Some(Value::String(s)) => vec![s.clone()],
        _ => Vec::new(),
    };

    if messages.is_empty() {
        UNKNOWN_ERROR_MESSAGE.to_string()
    } else {
        messages.join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorCategory;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::time::Duration;

    struct TestConfig {
        endpoint: String,
        timeout: Duration,
    }

    impl ConfigProvider for TestConfig {
        fn api_endpoint(&self) -> &str {
            &self.endpoint
        }

        fn timeout(&self) -> Duration {
            self.timeout
        }
    }

    fn client_for(server: &MockServer) -> BlsClient {
        let config = TestConfig {
            endpoint: server.url("/publicAPI/v2/timeseries/data/"),
            timeout: Duration::from_secs(5),
        };
        BlsClient::new(&config).unwrap()
    }

    fn query(ids: &[&str]) -> SeriesQuery {
        SeriesQuery {
            series_ids: ids.iter().map(|id| id.to_string()).collect(),
            start_year: 2023,
            end_year: 2024,
            registration_key: "secret".to_string(),
        }
    }

    #[tokio::test]
    async fn test_fetch_sends_expected_payload() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/publicAPI/v2/timeseries/data/")
                .header("content-type", "application/json")
                .json_body(json!({
                    "seriesid": ["CUUR0000SA0", "CUUS0000SA0"],
                    "startyear": "2023",
                    "endyear": "2024",
                    "registrationkey": "secret"
                }));
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({
                    "status": "REQUEST_SUCCEEDED",
                    "message": [],
                    "Results": {
                        "series": [
                            {"seriesID": "CUUS0000SA0", "data": [
                                {"year": "2024", "period": "M02", "periodName": "February", "value": "310.326"}
                            ]},
                            {"seriesID": "CUUR0000SA0", "data": [
                                {"year": "2024", "period": "M01", "periodName": "January", "value": "308.417"},
                                {"year": "2023", "period": "M12", "periodName": "December", "value": "306.746"}
                            ]}
                        ]
                    }
                }));
        });

        let client = client_for(&server);
        let series = client
            .fetch(&query(&["CUUR0000SA0", "CUUS0000SA0"]))
            .await
            .unwrap();

        api_mock.assert();
        // 保留 API 回傳的順序
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].series_id, "CUUS0000SA0");
        assert_eq!(series[1].series_id, "CUUR0000SA0");
        assert_eq!(series[1].data.len(), 2);
        assert_eq!(series[1].data[1].period_name, "December");
        assert_eq!(series[1].data[1].value, "306.746");
    }

    #[tokio::test]
    async fn test_fetch_reports_api_failure_messages() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/publicAPI/v2/timeseries/data/");
            then.status(200).json_body(json!({
                "status": "REQUEST_NOT_SUCCESSFUL",
                "message": ["invalid series", "daily threshold reached"]
            }));
        });

        let err = client_for(&server).fetch(&query(&["BAD"])).await.unwrap_err();

        api_mock.assert();
        assert_eq!(err.category(), ErrorCategory::Remote);
        assert_eq!(err.to_string(), "invalid series; daily threshold reached");
    }

    #[tokio::test]
    async fn test_fetch_rejects_non_json_body() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/publicAPI/v2/timeseries/data/");
            then.status(200).body("<html>maintenance</html>");
        });

        let err = client_for(&server).fetch(&query(&["A"])).await.unwrap_err();

        api_mock.assert();
        assert!(matches!(err, PullerError::InvalidResponse(_)));
        assert!(err.to_string().starts_with("Invalid API response: "));
    }

    #[tokio::test]
    async fn test_fetch_http_error_status() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/publicAPI/v2/timeseries/data/");
            then.status(500);
        });

        let err = client_for(&server).fetch(&query(&["A"])).await.unwrap_err();

        api_mock.assert();
        assert!(matches!(err, PullerError::Transport(_)));
        assert!(err.to_string().starts_with("API request failed: "));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        let config = TestConfig {
            endpoint: "http://127.0.0.1:1/data".to_string(),
            timeout: Duration::from_secs(2),
        };
        let client = BlsClient::new(&config).unwrap();

        let err = client.fetch(&query(&["A"])).await.unwrap_err();
        assert!(matches!(err, PullerError::Transport(_)));
    }

    #[tokio::test]
    async fn test_fetch_times_out_without_retry() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/publicAPI/v2/timeseries/data/");
            then.status(200)
                .delay(Duration::from_secs(2))
                .json_body(json!({"status": "REQUEST_SUCCEEDED"}));
        });

        let config = TestConfig {
            endpoint: server.url("/publicAPI/v2/timeseries/data/"),
            timeout: Duration::from_millis(200),
        };
        let client = BlsClient::new(&config).unwrap();

        let err = client.fetch(&query(&["A"])).await.unwrap_err();

        match &err {
            PullerError::Transport(cause) => assert!(cause.is_timeout()),
            other => panic!("expected transport timeout, got {:?}", other),
        }
        // 只送出一次請求，不重試
        api_mock.assert_hits(1);
    }

    #[test]
    fn test_parse_envelope_unknown_error_fallback() {
        let err = parse_envelope(json!({"status": "REQUEST_NOT_SUCCESSFUL"})).unwrap_err();
        assert_eq!(err.to_string(), UNKNOWN_ERROR_MESSAGE);

        let err = parse_envelope(json!({"status": "FAILED", "message": []})).unwrap_err();
        assert_eq!(err.to_string(), UNKNOWN_ERROR_MESSAGE);

        let err = parse_envelope(json!({"message": ["no status"]})).unwrap_err();
        assert_eq!(err.to_string(), "no status");
    }

    #[test]
    fn test_parse_envelope_missing_results_is_empty() {
        let series = parse_envelope(json!({"status": "REQUEST_SUCCEEDED"})).unwrap();
        assert!(series.is_empty());

        let series =
            parse_envelope(json!({"status": "REQUEST_SUCCEEDED", "Results": {}})).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn test_parse_envelope_malformed_series() {
        let err = parse_envelope(json!({
            "status": "REQUEST_SUCCEEDED",
            "Results": {"series": "not-a-list"}
        }))
        .unwrap_err();
        assert!(matches!(err, PullerError::InvalidResponse(_)));
    }
}
