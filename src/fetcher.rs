//! Random image retrieval.
//!
//! One GET per call, no retries and no de-duplication of concurrent calls.

use std::future::Future;

use reqwest::header::ACCEPT;
use reqwest::Client;
use thiserror::Error;

use crate::config::ApiConfig;
use crate::model::DogImage;

/// Errors that can occur while fetching an image.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure (DNS, connect, reset, TLS).
    #[error("Request to '{endpoint}' failed: {source}")]
    Network {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// Request exceeded the configured deadline.
    #[error("Request to '{endpoint}' timed out after {seconds}s")]
    Timeout { endpoint: String, seconds: u64 },

    /// Body was not a `{message, status}` envelope.
    #[error("Unexpected response body: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// Short classification for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Network { .. } => "network",
            FetchError::Timeout { .. } => "timeout",
            FetchError::Decode { .. } => "decode",
        }
    }
}

/// Anything that can produce the next dog image.
pub trait ImageSource: Send + Sync + 'static {
    fn fetch(&self) -> impl Future<Output = Result<DogImage, FetchError>> + Send;
}

/// [`ImageSource`] backed by the HTTP endpoint from configuration.
#[derive(Debug, Clone)]
pub struct RemoteImageFetcher {
    client: Client,
    endpoint: String,
    timeout_seconds: u64,
}

impl RemoteImageFetcher {
    pub fn new(api: &ApiConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .connect_timeout(api.connect_timeout())
            .timeout(api.timeout())
            .build()
            .map_err(|e| FetchError::Network {
                endpoint: api.endpoint.clone(),
                source: e,
            })?;

        Ok(Self {
            client,
            endpoint: api.endpoint.clone(),
            timeout_seconds: api.timeout().as_secs(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn transport_error(&self, source: reqwest::Error) -> FetchError {
        if source.is_timeout() {
            FetchError::Timeout {
                endpoint: self.endpoint.clone(),
                seconds: self.timeout_seconds,
            }
        } else {
            FetchError::Network {
                endpoint: self.endpoint.clone(),
                source,
            }
        }
    }

    async fn fetch_once(&self) -> Result<DogImage, FetchError> {
        let response = self
            .client
            .get(&self.endpoint)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        // The API reports failures in the same envelope, so the body is
        // decoded whatever the status code.
        let status = response.status();
        let body = response.bytes().await.map_err(|e| self.transport_error(e))?;
        let image: DogImage =
            serde_json::from_slice(&body).map_err(|e| FetchError::Decode { source: e })?;

        if !image.is_success() {
            tracing::warn!(
                http_status = status.as_u16(),
                status = %image.status,
                message = %image.message,
                "image endpoint reported failure"
            );
        } else {
            tracing::debug!(url = %image.message, "fetched image");
        }

        Ok(image)
    }
}

impl ImageSource for RemoteImageFetcher {
    fn fetch(&self) -> impl Future<Output = Result<DogImage, FetchError>> + Send {
        self.fetch_once()
    }
}
