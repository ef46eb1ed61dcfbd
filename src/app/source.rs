//! Where fresh numbers come from.
//!
//! [`SimulatedSource`] waits a fixed delay and draws values locally;
//! [`HttpSource`] asks a remote endpoint. The composite fetch action works
//! against the [`NumberSource`] trait and does not care which one it gets.

use std::sync::Arc;
use std::time::Duration;

use futures_core::future::BoxFuture;
use reqwest::Url;
use thiserror::Error;

use crate::config::ApiConfig;

/// Errors that can occur while fetching numbers.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Failed to reach the endpoint
    #[error("Request to '{endpoint}' failed: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// Request exceeded the configured timeout
    #[error("Request timeout after {}s", after.as_secs())]
    Timeout { after: Duration },

    /// Endpoint answered with a non-success status
    #[error("Endpoint returned HTTP {status}")]
    Status { status: u16 },

    /// Body was not a JSON array of numbers
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// Endpoint is not an absolute http(s) URL
    #[error("Invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}

/// A provider of random values in `[0, 100)`.
pub trait NumberSource: Send + Sync {
    /// Name used in log fields.
    fn name(&self) -> &'static str;

    /// Fetch up to `count` values, each in `[0, 100)`. Fewer is not an error.
    fn fetch(&self, count: usize) -> BoxFuture<'_, Result<Vec<f64>, FetchError>>;
}

/// Uniform draw in `[0, 100)`.
pub fn random_value() -> f64 {
    fastrand::f64() * 100.0
}

/// Local source that pretends to be a slow network call.
#[derive(Debug, Clone)]
pub struct SimulatedSource {
    delay: Duration,
}

impl SimulatedSource {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl NumberSource for SimulatedSource {
    fn name(&self) -> &'static str {
        "simulated"
    }

    fn fetch(&self, count: usize) -> BoxFuture<'_, Result<Vec<f64>, FetchError>> {
        Box::pin(async move {
            tokio::time::sleep(self.delay).await;
            Ok((0..count).map(|_| random_value()).collect())
        })
    }
}

/// Remote source: `GET <endpoint>?count=N` answering a JSON array of numbers.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    endpoint: Url,
    timeout: Duration,
}

impl HttpSource {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, FetchError> {
        let endpoint = parse_endpoint(endpoint)?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| FetchError::Request {
                endpoint: endpoint.to_string(),
                source,
            })?;
        Ok(Self {
            client,
            endpoint,
            timeout,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn fetch_inner(&self, count: usize) -> Result<Vec<f64>, FetchError> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("count", &count.to_string());

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| self.classify(err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|err| self.classify(err))?;
        let mut values: Vec<f64> =
            serde_json::from_str(&body).map_err(|err| FetchError::Malformed(err.to_string()))?;
        values.truncate(count);
        if let Some(bad) = values.iter().find(|value| !(0.0..100.0).contains(*value)) {
            return Err(FetchError::Malformed(format!(
                "value {} outside [0, 100)",
                bad
            )));
        }
        Ok(values)
    }

    fn classify(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout {
                after: self.timeout,
            }
        } else {
            FetchError::Request {
                endpoint: self.endpoint.to_string(),
                source: err,
            }
        }
    }
}

/// Accept only absolute http(s) URLs.
pub fn parse_endpoint(endpoint: &str) -> Result<Url, FetchError> {
    let invalid = |reason: String| FetchError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason,
    };
    let url = Url::parse(endpoint).map_err(|err| invalid(err.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme '{}'", other))),
    }
}

impl NumberSource for HttpSource {
    fn name(&self) -> &'static str {
        "http"
    }

    fn fetch(&self, count: usize) -> BoxFuture<'_, Result<Vec<f64>, FetchError>> {
        Box::pin(self.fetch_inner(count))
    }
}

/// Build the source described by `[api]`: HTTP when an endpoint is set,
/// simulated otherwise.
pub fn source_from_config(api: &ApiConfig) -> Result<Arc<dyn NumberSource>, FetchError> {
    match &api.endpoint {
        Some(endpoint) => Ok(Arc::new(HttpSource::new(
            endpoint,
            Duration::from_secs(api.timeout_seconds),
        )?)),
        None => Ok(Arc::new(SimulatedSource::new(Duration::from_millis(
            api.delay_ms,
        )))),
    }
}
