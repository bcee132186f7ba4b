//! GeoClue2-backed location authorization.
//!
//! GeoClue2 has no status property of its own. The status is derived from
//! what the service lets this process do:
//!
//! - `AvailableAccuracyLevel == 0` on the manager: location services are
//!   off system-wide (`Restricted`)
//! - `Start` rejected with `AccessDenied`: the agent or policy refused (`Denied`)
//! - client `Active`: started and allowed while this process runs
//!   (`AuthorizedWhenInUse`)
//! - anything else: the agent has not answered yet (`NotDetermined`)

use async_trait::async_trait;
use log::{debug, warn};
use zbus::Connection;
use zvariant::OwnedObjectPath;

use crate::Result;
use crate::api::models::{AuthorizationStatus, ScanError};
use crate::core::authorization::LocationAuthorizer;
use crate::dbus::{GeoClueClientProxy, GeoClueManagerProxy};
use crate::types::constants::{accuracy_level, bus_names};
use crate::util::utils::method_error_name;

struct GeoClueHandle {
    manager: GeoClueManagerProxy<'static>,
    client: GeoClueClientProxy<'static>,
    path: OwnedObjectPath,
}

/// Location authorizer talking to GeoClue2 on the system bus.
///
/// The GeoClue client is created by
/// [`start_updating_location`](LocationAuthorizer::start_updating_location)
/// and deleted by
/// [`stop_updating_location`](LocationAuthorizer::stop_updating_location).
pub struct GeoClueAuthorizer {
    conn: Connection,
    handle: Option<GeoClueHandle>,
    denied: bool,
}

impl GeoClueAuthorizer {
    /// Creates an authorizer on an existing system bus connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn,
            handle: None,
            denied: false,
        }
    }
}

/// Calls `Start` on the client. Returns `false` if access was denied.
async fn start_client(client: &GeoClueClientProxy<'_>) -> Result<bool> {
    match client.start().await {
        Ok(()) => {
            debug!("GeoClue client started");
            Ok(true)
        }
        Err(e) if method_error_name(&e) == Some(bus_names::ACCESS_DENIED) => {
            debug!("GeoClue refused to start the client: {e}");
            Ok(false)
        }
        Err(e) => Err(ScanError::DbusOperation {
            context: "failed to start GeoClue client".into(),
            source: e,
        }),
    }
}

/// Maps what GeoClue allowed onto an authorization status.
///
/// Disabled location services take precedence over a refused start.
pub(crate) fn status_from(
    available_level: u32,
    denied: bool,
    active: bool,
) -> AuthorizationStatus {
    if available_level == accuracy_level::NONE {
        AuthorizationStatus::Restricted
    } else if denied {
        AuthorizationStatus::Denied
    } else if active {
        AuthorizationStatus::AuthorizedWhenInUse
    } else {
        AuthorizationStatus::NotDetermined
    }
}

#[async_trait]
impl LocationAuthorizer for GeoClueAuthorizer {
    async fn start_updating_location(&mut self) -> Result<()> {
        let manager = GeoClueManagerProxy::new(&self.conn).await?;
        let path = manager
            .get_client()
            .await
            .map_err(|e| ScanError::DbusOperation {
                context: "failed to obtain a GeoClue client".into(),
                source: e,
            })?;
        debug!("Using GeoClue client {}", path.as_str());

        let client = GeoClueClientProxy::builder(&self.conn)
            .path(path.clone())?
            .build()
            .await?;
        client.set_desktop_id(bus_names::GEOCLUE_DESKTOP_ID).await?;
        client
            .set_requested_accuracy_level(accuracy_level::COUNTRY)
            .await?;

        self.denied = !start_client(&client).await?;
        self.handle = Some(GeoClueHandle {
            manager,
            client,
            path,
        });
        Ok(())
    }

    async fn authorization_status(&mut self) -> Result<AuthorizationStatus> {
        let Some(handle) = &self.handle else {
            return Ok(AuthorizationStatus::NotDetermined);
        };

        let available_level = handle.manager.available_accuracy_level().await?;
        let enabled = available_level != accuracy_level::NONE;

        // A refused start may be granted later by the agent.
        if enabled && self.denied {
            self.denied = !start_client(&handle.client).await?;
        }

        let active = enabled && !self.denied && handle.client.active().await?;
        Ok(status_from(available_level, self.denied, active))
    }

    async fn stop_updating_location(&mut self) -> Result<()> {
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };

        if let Err(e) = handle.client.stop().await {
            warn!("Failed to stop GeoClue client: {e}");
        }
        if let Err(e) = handle.manager.delete_client(&handle.path).await {
            warn!("Failed to delete GeoClue client {}: {e}", handle.path.as_str());
        }
        debug!("GeoClue client released");
        Ok(())
    }
}
