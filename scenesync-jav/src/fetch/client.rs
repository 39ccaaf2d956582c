//! Catalog API client
//!
//! Endpoint: `GET {base}/jav/{scene_id}?add_to_collection=true`
//!
//! Every request carries a bearer token, `Accept: application/json`, and
//! the configured User-Agent. The `/jav/` endpoint only answers curl-like
//! user agents, hence the `curl/8.7.1` default.

use super::response::{RawScene, SceneEnvelope};
use super::{FetchError, SceneSource};
use crate::error::SyncError;
use crate::types::RemoteId;
use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use scenesync_common::config::SyncConfig;
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP client for one catalog host
pub struct JavApiClient {
    http_client: Client,
    base_url: String,
    timeout: Duration,
}

impl JavApiClient {
    /// Build the client from configuration
    ///
    /// A missing token is allowed (every request will then be rejected and
    /// recorded as a failure); a token that is not a valid header value is not.
    pub fn new(config: &SyncConfig) -> Result<Self, SyncError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        match config.api_token.as_deref() {
            Some(token) => {
                let mut value = header::HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|e| SyncError::Client(format!("invalid API token: {}", e)))?;
                value.set_sensitive(true);
                headers.insert(header::AUTHORIZATION, value);
            }
            None => warn!("No API token configured; requests will be unauthenticated"),
        }

        let http_client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()
            .map_err(|e| SyncError::Client(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            timeout: config.request_timeout(),
        })
    }

    /// Full request URL for a scene (without query string)
    pub fn scene_url(&self, scene_id: &RemoteId) -> String {
        format!("{}/jav/{}", self.base_url, scene_id)
    }

    fn map_send_error(&self, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else {
            FetchError::Network(e.to_string())
        }
    }
}

#[async_trait]
impl SceneSource for JavApiClient {
    async fn fetch_scene(&self, scene_id: &RemoteId) -> Result<RawScene, FetchError> {
        let url = self.scene_url(scene_id);
        debug!(url = %url, "Requesting scene");

        let response = self
            .http_client
            .get(&url)
            .query(&[("add_to_collection", "true")])
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound);
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response.bytes().await.map_err(|e| self.map_send_error(e))?;
        let envelope: SceneEnvelope =
            serde_json::from_slice(&body).map_err(|e| FetchError::Parse(e.to_string()))?;

        Ok(envelope.data)
    }
}
