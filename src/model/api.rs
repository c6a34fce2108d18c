//! Transport for the alquran.cloud content API
//!
//! Every remote lookup goes through [`ContentSource`], which returns the raw
//! status and body of one GET request. Parsing lives with the callers so the
//! network can be swapped for an in-memory source in tests.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://api.alquran.cloud";

/// `code` value the API reports for a successful lookup
pub const SUCCESS_CODE: u16 = 200;

/// Raw reply of a single GET request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {path} failed: {message}")]
    Transport { path: String, message: String },

    #[error("request to {path} timed out")]
    Timeout { path: String },

    #[error("{path} returned HTTP {status}")]
    Status { path: String, status: u16 },

    #[error("malformed response from {path}: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    pub fn from_reqwest(path: &str, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout {
                path: path.to_string(),
            }
        } else {
            Self::Transport {
                path: path.to_string(),
                message: error.to_user_friendly_message(),
            }
        }
    }
}

pub trait ReqwestErrorExt {
    fn to_user_friendly_message(&self) -> String;
}

impl ReqwestErrorExt for reqwest::Error {
    fn to_user_friendly_message(&self) -> String {
        if self.is_connect() || self.is_request() {
            "connection error, check your internet connection".to_string()
        } else if self.is_timeout() {
            "the content server did not answer in time".to_string()
        } else if self.is_decode() {
            "unexpected response format from the content server".to_string()
        } else {
            format!("network error: {}", self)
        }
    }
}

/// Source of raw API replies, keyed by request path (`/v1/...`)
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn get(&self, path: &str) -> Result<HttpReply, ApiError>;
}

/// reqwest-backed [`ContentSource`] talking to a real API host
pub struct HttpContentSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpContentSource {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("mushaf-tui/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ContentSource for HttpContentSource {
    async fn get(&self, path: &str) -> Result<HttpReply, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        crate::log_api_request!("GET", url = %url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(path, e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::from_reqwest(path, e))?;

        tracing::debug!(url = %url, status, bytes = body.len(), "API response received");
        Ok(HttpReply::new(status, body))
    }
}

/// Payload half of the `{code, data}` reply; `code` is read separately
/// through [`ResponseCode`] where it matters
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

/// Only the `code` field, read before the payload so that error replies
/// (whose `data` is a plain string) are reported by code
#[derive(Debug, Deserialize)]
pub(crate) struct ResponseCode {
    pub code: u16,
}

pub(crate) fn decode<T: DeserializeOwned>(path: &str, body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|source| ApiError::Malformed {
        path: path.to_string(),
        source,
    })
}
