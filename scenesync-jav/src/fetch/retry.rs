//! Bounded retry with linear backoff
//!
//! ```text
//! Pending -> Attempting(1) -> Success
//!                          -> Attempting(n + 1)   (after sleeping delay * n)
//!                          -> Exhausted           (n == max_attempts)
//! ```
//!
//! Every failure kind, "not found" included, consumes an attempt.

use super::response::RawScene;
use super::{FetchError, SceneSource, Sleeper};
use crate::types::RemoteId;
use std::time::Duration;
use tracing::{debug, warn};

/// Retry limits for one item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, at least 1
    pub max_attempts: u32,
    /// Backoff unit; also the per-item throttle delay
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Wait after failed attempt `attempt` (1-based): `base_delay * attempt`
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }
}

/// State of one item's fetch
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    Pending,
    Attempting { attempt: u32 },
    Success { attempts: u32, scene: RawScene },
    Exhausted { attempts: u32, last_error: FetchError },
}

/// Terminal result of [`fetch_with_retry`]
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Success { attempts: u32, scene: RawScene },
    Exhausted { attempts: u32, last_error: FetchError },
}

impl FetchState {
    /// Advance by one transition
    ///
    /// Terminal states are returned unchanged.
    pub async fn step<S, Z>(
        self,
        source: &S,
        sleeper: &Z,
        policy: &RetryPolicy,
        scene_id: &RemoteId,
    ) -> FetchState
    where
        S: SceneSource + ?Sized,
        Z: Sleeper + ?Sized,
    {
        match self {
            FetchState::Pending => FetchState::Attempting { attempt: 1 },
            FetchState::Attempting { attempt } => match source.fetch_scene(scene_id).await {
                Ok(scene) => FetchState::Success {
                    attempts: attempt,
                    scene,
                },
                Err(e) if attempt < policy.max_attempts => {
                    let delay = policy.backoff(attempt);
                    warn!(
                        scene_id = %scene_id,
                        error = %e,
                        delay_ms = delay.as_millis() as u64,
                        "Retry {}/{}",
                        attempt,
                        policy.max_attempts
                    );
                    sleeper.sleep(delay).await;
                    FetchState::Attempting {
                        attempt: attempt + 1,
                    }
                }
                Err(e) => {
                    debug!(scene_id = %scene_id, attempts = attempt, "Retries exhausted");
                    FetchState::Exhausted {
                        attempts: attempt,
                        last_error: e,
                    }
                }
            },
            terminal => terminal,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            FetchState::Success { .. } | FetchState::Exhausted { .. }
        )
    }
}

/// Drive one scene id from `Pending` to a terminal state
pub async fn fetch_with_retry<S, Z>(
    source: &S,
    sleeper: &Z,
    policy: &RetryPolicy,
    scene_id: &RemoteId,
) -> FetchOutcome
where
    S: SceneSource + ?Sized,
    Z: Sleeper + ?Sized,
{
    let mut state = FetchState::Pending;
    loop {
        state = match state.step(source, sleeper, policy, scene_id).await {
            FetchState::Success { attempts, scene } => {
                return FetchOutcome::Success { attempts, scene }
            }
            FetchState::Exhausted {
                attempts,
                last_error,
            } => {
                return FetchOutcome::Exhausted {
                    attempts,
                    last_error,
                }
            }
            next => next,
        };
    }
}
