//! Location authorization gate.
//!
//! Radio metadata such as BSSIDs is only released to processes holding
//! location authorization. The gate starts location updates (which is what
//! makes the platform consider the request at all), then polls the
//! authorization status at a fixed interval until it is sufficient or the
//! attempt budget runs out. There is no backoff.

use async_trait::async_trait;
use futures_timer::Delay;
use log::{debug, warn};
use std::time::Duration;

use crate::Result;
use crate::api::models::{AuthorizationStatus, ScanError};
use crate::types::constants::authorization;

/// A source of location authorization.
///
/// Implemented by [`GeoClueAuthorizer`](crate::GeoClueAuthorizer) for the
/// system location service; tests provide scripted implementations.
#[async_trait]
pub trait LocationAuthorizer: Send {
    /// Begins location updates. Called once before the first poll.
    async fn start_updating_location(&mut self) -> Result<()>;

    /// Returns the current authorization status.
    async fn authorization_status(&mut self) -> Result<AuthorizationStatus>;

    /// Stops location updates and releases the location handle.
    async fn stop_updating_location(&mut self) -> Result<()>;
}

/// Retry budget of the authorization gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorizationPolicy {
    /// Number of status polls before giving up (at least 1).
    pub max_attempts: u32,
    /// Delay between two polls.
    pub poll_interval: Duration,
}

impl Default for AuthorizationPolicy {
    fn default() -> Self {
        Self {
            max_attempts: authorization::MAX_ATTEMPTS,
            poll_interval: authorization::poll_interval(),
        }
    }
}

impl AuthorizationPolicy {
    /// Sets the number of polls; values below 1 are raised to 1.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    #[must_use]
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

/// Blocks until `location` reports sufficient authorization.
///
/// Starts location updates, then polls up to `policy.max_attempts` times,
/// sleeping `policy.poll_interval` between polls (never after the last one).
///
/// # Errors
///
/// Returns `ScanError::AuthorizationTimeout` with the last observed status
/// when the budget is exhausted, or any error raised by `location`.
pub async fn wait_for_authorization<L>(
    location: &mut L,
    policy: &AuthorizationPolicy,
) -> Result<AuthorizationStatus>
where
    L: LocationAuthorizer + ?Sized,
{
    location.start_updating_location().await?;

    let attempts = policy.max_attempts.max(1);
    let mut last_status = AuthorizationStatus::NotDetermined;

    for attempt in 1..=attempts {
        last_status = location.authorization_status().await?;
        debug!("Authorization poll {attempt}/{attempts}: {last_status}");

        if last_status.is_sufficient() {
            return Ok(last_status);
        }

        if attempt < attempts {
            Delay::new(policy.poll_interval).await;
        }
    }

    warn!("Location authorization still {last_status} after {attempts} attempts");
    Err(ScanError::AuthorizationTimeout {
        attempts,
        last_status,
    })
}
