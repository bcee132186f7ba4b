use log::debug;
use std::io::Write;
use std::time::Duration;
use zbus::Connection;

use crate::Result;
use crate::api::models::{AuthorizationStatus, WirelessNetworkRecord};
use crate::core::authorization::{AuthorizationPolicy, LocationAuthorizer, wait_for_authorization};
use crate::core::location::GeoClueAuthorizer;
use crate::core::report::write_report;
use crate::core::scan::{NmWirelessInterface, WirelessInterface};
use crate::types::constants::timeouts;

/// Tunables for a system scan session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    pub authorization: AuthorizationPolicy,
    /// How long to wait for the platform to finish the scan.
    pub scan_timeout: Duration,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            authorization: AuthorizationPolicy::default(),
            scan_timeout: timeouts::scan_complete_timeout(),
        }
    }
}

/// One scan run: a location handle plus a wireless interface handle.
///
/// Both handles are acquired when the session is built and released by
/// [`close`](Self::close).
///
/// # Example
///
/// ```no_run
/// use pinpoint::{ScanOptions, ScanSession};
///
/// # async fn example() -> pinpoint::Result<()> {
/// let mut session = ScanSession::system(ScanOptions::default()).await?;
/// let mut out = std::io::stdout().lock();
/// let result = session.run(&mut out).await;
/// session.close().await?;
/// result?;
/// # Ok(())
/// # }
/// ```
pub struct ScanSession<L = GeoClueAuthorizer, W = NmWirelessInterface> {
    location: L,
    interface: W,
    policy: AuthorizationPolicy,
}

impl ScanSession<GeoClueAuthorizer, NmWirelessInterface> {
    /// Connects to the system bus and binds GeoClue2 and the default
    /// NetworkManager Wi-Fi device.
    pub async fn system(options: ScanOptions) -> Result<Self> {
        let conn = Connection::system().await?;
        let interface = NmWirelessInterface::default_interface(&conn)
            .await?
            .with_scan_timeout(options.scan_timeout);
        let location = GeoClueAuthorizer::new(conn);

        Ok(Self::new(location, interface, options.authorization))
    }
}

impl<L, W> ScanSession<L, W>
where
    L: LocationAuthorizer,
    W: WirelessInterface,
{
    pub fn new(location: L, interface: W, policy: AuthorizationPolicy) -> Self {
        Self {
            location,
            interface,
            policy,
        }
    }

    /// The wireless interface this session scans on.
    pub fn interface(&self) -> &W {
        &self.interface
    }

    /// Runs the authorization gate.
    pub async fn authorize(&mut self) -> Result<AuthorizationStatus> {
        wait_for_authorization(&mut self.location, &self.policy).await
    }

    /// Performs one scan on the session's interface.
    pub async fn scan(&self) -> Result<Vec<WirelessNetworkRecord>> {
        debug!("Scanning on {}", self.interface.name());
        self.interface.scan_for_networks().await
    }

    /// Authorizes, scans, and writes the report to `out`.
    ///
    /// Returns the number of network rows written.
    pub async fn run<Out: Write + ?Sized>(&mut self, out: &mut Out) -> Result<usize> {
        let status = self.authorize().await?;
        debug!("Location authorization: {status}");

        let records = self.scan().await?;
        Ok(write_report(out, &records)?)
    }

    /// Stops location updates and releases both handles.
    pub async fn close(mut self) -> Result<()> {
        self.location.stop_updating_location().await
    }
}
