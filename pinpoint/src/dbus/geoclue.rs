//! GeoClue2 location service proxies.

use zbus::{Result, proxy};
use zvariant::OwnedObjectPath;

/// Proxy for the GeoClue2 manager.
///
/// Hands out per-application client objects and reports whether the
/// location service is usable at all.
#[proxy(
    interface = "org.freedesktop.GeoClue2.Manager",
    default_service = "org.freedesktop.GeoClue2",
    default_path = "/org/freedesktop/GeoClue2/Manager"
)]
pub trait GeoClueManager {
    /// Returns this connection's client object, creating it on first use.
    fn get_client(&self) -> Result<OwnedObjectPath>;

    /// Releases a client object obtained from `get_client`.
    fn delete_client(&self, client: &zvariant::ObjectPath<'_>) -> Result<()>;

    /// Highest accuracy level any client may get (0 = service disabled).
    #[zbus(property)]
    fn available_accuracy_level(&self) -> Result<u32>;
}

/// Proxy for a GeoClue2 client object.
///
/// `DesktopId` and `RequestedAccuracyLevel` must be set before `Start`;
/// `Start` is rejected with `AccessDenied` when the user or the
/// configured policy refuses location access.
#[proxy(
    interface = "org.freedesktop.GeoClue2.Client",
    default_service = "org.freedesktop.GeoClue2"
)]
pub trait GeoClueClient {
    /// Begins location updates.
    fn start(&self) -> Result<()>;

    /// Stops location updates.
    fn stop(&self) -> Result<()>;

    /// Desktop file id identifying the application to the agent.
    #[zbus(property)]
    fn set_desktop_id(&self, id: &str) -> Result<()>;

    /// Requested accuracy level.
    #[zbus(property)]
    fn set_requested_accuracy_level(&self, level: u32) -> Result<()>;

    /// Whether the client is started and authorized.
    #[zbus(property)]
    fn active(&self) -> Result<bool>;
}
