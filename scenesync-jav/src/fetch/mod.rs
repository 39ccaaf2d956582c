//! Scene fetching
//!
//! - `client`: reqwest client for the `/jav/{scene_id}` endpoint
//! - `response`: typed view of the response `data` object
//! - `retry`: bounded retry state machine with linear backoff
//!
//! The network and the clock sit behind [`SceneSource`] and [`Sleeper`] so
//! the retry loop can be driven in tests without either.

pub mod client;
pub mod response;
pub mod retry;

pub use client::JavApiClient;
pub use response::RawScene;
pub use retry::{fetch_with_retry, FetchOutcome, FetchState, RetryPolicy};

use crate::types::RemoteId;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Failure of a single fetch attempt
///
/// The Display text is what ends up in the failed-entries file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Scene id unknown to the catalog (still retried)
    #[error("404 Not Found")]
    NotFound,

    /// Any other non-success status
    #[error("{status} {reason}")]
    Status { status: u16, reason: String },

    /// No response within the request timeout
    #[error("Request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// Connection or transport failure
    #[error("Network error: {0}")]
    Network(String),

    /// Body is not JSON or has no usable `data` object
    #[error("Invalid response: {0}")]
    Parse(String),
}

/// Something that can look up one scene
#[async_trait]
pub trait SceneSource: Send + Sync {
    /// Fetch the `data` object for a scene id
    async fn fetch_scene(&self, scene_id: &RemoteId) -> Result<RawScene, FetchError>;
}

/// Delay provider for backoff and throttling
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Real delays via the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}
