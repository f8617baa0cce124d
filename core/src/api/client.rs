//! HTTP client for the job backend
//!
//! Every call goes through [`ApiClient::request`], which applies the
//! client-side timeout, maps non-success statuses and picks JSON or binary
//! decoding from the declared content type.

use crate::config::DashboardConfig;
use crate::error::{ApiError, Error, Result};
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Content type sent with (and recognised on) JSON bodies
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Decoded body of a successful response
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// The server declared a JSON content type
    Json(serde_json::Value),
    /// Anything else, e.g. a generated document
    Binary(Bytes),
}

impl ResponseBody {
    pub fn is_json(&self) -> bool {
        matches!(self, ResponseBody::Json(_))
    }

    /// Decode a JSON body into a typed record
    pub fn into_json<T: DeserializeOwned>(self) -> Result<T> {
        match self {
            ResponseBody::Json(value) => serde_json::from_value(value).map_err(|e| {
                ApiError::Parse {
                    message: e.to_string(),
                }
                .into()
            }),
            ResponseBody::Binary(bytes) => Err(ApiError::Parse {
                message: format!(
                    "expected a JSON body, received {} bytes of binary content",
                    bytes.len()
                ),
            }
            .into()),
        }
    }

    /// Raw payload; JSON bodies are re-serialized
    pub fn into_bytes(self) -> Bytes {
        match self {
            ResponseBody::Binary(bytes) => bytes,
            ResponseBody::Json(value) => Bytes::from(value.to_string()),
        }
    }
}

/// Per-request options
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    /// `None` sends the default JSON content type; `Some` replaces the whole set
    pub headers: Option<Vec<(String, String)>>,
    pub body: Option<String>,
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            headers: None,
            body: None,
        }
    }

    /// Replace the default headers
    pub fn with_headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Send no headers at all, used for binary downloads
    pub fn without_default_headers(self) -> Self {
        self.with_headers(Vec::new())
    }

    /// JSON-encode `body` as the request payload
    pub fn with_json_body<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_string(body)?);
        Ok(self)
    }

    fn effective_headers(headers: Option<Vec<(String, String)>>) -> Vec<(String, String)> {
        headers.unwrap_or_else(|| {
            vec![(CONTENT_TYPE.as_str().to_string(), JSON_CONTENT_TYPE.to_string())]
        })
    }
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::new(Method::GET)
    }
}

/// Client bound to one backend base URL
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl ApiClient {
    /// Create a client from resolved configuration
    pub fn new(config: &DashboardConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder().build().map_err(network_error)?;

        Ok(Self {
            client,
            base_url: config.api_base(),
            timeout: config.request_timeout(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Full URL of an endpoint
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Issue a request and decode the response
    pub async fn request(&self, endpoint: &str, options: RequestOptions) -> Result<ResponseBody> {
        let url = self.url(endpoint);
        let RequestOptions {
            method,
            headers,
            body,
        } = options;

        debug!(%method, %url, "sending API request");

        let mut builder = self.client.request(method, &url);
        for (name, value) in RequestOptions::effective_headers(headers) {
            builder = builder.header(name, value);
        }
        if let Some(body) = body {
            builder = builder.body(body);
        }

        // Dropping the send future on expiry aborts the in-flight call.
        let response = match tokio::time::timeout(self.timeout, builder.send()).await {
            Ok(Ok(response)) => response,
            Ok(Err(err)) => {
                error!(%url, error = %err, "API request failed");
                return Err(network_error(err));
            }
            Err(_) => {
                let timeout_ms = self.timeout.as_millis() as u64;
                warn!(%url, timeout_ms, "API request timed out");
                return Err(ApiError::Timeout { timeout_ms }.into());
            }
        };

        let status = response.status();
        if !status.is_success() {
            error!(%url, status = status.as_u16(), "API request failed");
            return Err(ApiError::Http {
                status: status.as_u16(),
            }
            .into());
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.contains(JSON_CONTENT_TYPE))
            .unwrap_or(false);

        let bytes = response.bytes().await.map_err(network_error)?;

        if is_json {
            let value = serde_json::from_slice(&bytes).map_err(|e| ApiError::Parse {
                message: e.to_string(),
            })?;
            Ok(ResponseBody::Json(value))
        } else {
            Ok(ResponseBody::Binary(bytes))
        }
    }

    /// GET request
    pub async fn get(&self, endpoint: &str) -> Result<ResponseBody> {
        self.request(endpoint, RequestOptions::new(Method::GET)).await
    }

    /// POST request with a JSON body
    pub async fn post<T>(&self, endpoint: &str, data: &T) -> Result<ResponseBody>
    where
        T: Serialize + ?Sized + Sync,
    {
        let options = RequestOptions::new(Method::POST).with_json_body(data)?;
        self.request(endpoint, options).await
    }

    /// PUT request with a JSON body
    pub async fn put<T>(&self, endpoint: &str, data: &T) -> Result<ResponseBody>
    where
        T: Serialize + ?Sized + Sync,
    {
        let options = RequestOptions::new(Method::PUT).with_json_body(data)?;
        self.request(endpoint, options).await
    }

    /// DELETE request
    pub async fn delete(&self, endpoint: &str) -> Result<ResponseBody> {
        self.request(endpoint, RequestOptions::new(Method::DELETE)).await
    }
}

fn network_error(err: reqwest::Error) -> Error {
    ApiError::Network {
        message: err.to_string(),
    }
    .into()
}
