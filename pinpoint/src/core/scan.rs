//! Wi-Fi network scanning.
//!
//! Provides the [`WirelessInterface`] seam and its NetworkManager
//! implementation: pick the default Wi-Fi device, request one scan, wait for
//! it to finish and turn every visible access point into a
//! [`WirelessNetworkRecord`].

use async_trait::async_trait;
use futures::{FutureExt, StreamExt, select};
use futures_timer::Delay;
use log::{debug, warn};
use std::collections::HashMap;
use std::pin::pin;
use std::time::Duration;
use zbus::Connection;
use zbus::fdo::PropertiesProxy;
use zbus::names::InterfaceName;
use zvariant::OwnedObjectPath;

use crate::Result;
use crate::api::models::{ChannelWidth, ScanError, WirelessNetworkRecord};
use crate::dbus::{NMAccessPointProxy, NMDeviceProxy, NMProxy, NMWirelessProxy};
use crate::types::constants::{bus_names, device_type, last_scan, timeouts};
use crate::util::utils::{
    channel_from_frequency, dbm_from_strength, decode_ssid, method_error_name, normalize_bssid,
    phy_mode_from_rate, security_from_flags,
};

/// A wireless interface that can enumerate nearby networks.
#[async_trait]
pub trait WirelessInterface: Send + Sync {
    /// Interface name (e.g. "wlan0").
    fn name(&self) -> &str;

    /// Performs one scan and returns every network seen, in platform order.
    async fn scan_for_networks(&self) -> Result<Vec<WirelessNetworkRecord>>;
}

/// Raw access point properties as exported by NetworkManager.
#[derive(Debug, Clone, Default)]
pub(crate) struct AccessPointSnapshot {
    pub ssid: Vec<u8>,
    pub hw_address: String,
    pub strength: u8,
    pub frequency: u32,
    pub bandwidth: Option<u32>,
    pub max_bitrate: u32,
    pub flags: u32,
    pub wpa_flags: u32,
    pub rsn_flags: u32,
}

impl AccessPointSnapshot {
    async fn read(ap: &NMAccessPointProxy<'_>) -> Result<Self> {
        Ok(Self {
            ssid: ap.ssid().await?,
            hw_address: ap.hw_address().await?,
            strength: ap.strength().await?,
            frequency: ap.frequency().await?,
            bandwidth: ap.bandwidth().await.ok(),
            max_bitrate: ap.max_bitrate().await?,
            flags: ap.flags().await?,
            wpa_flags: ap.wpa_flags().await?,
            rsn_flags: ap.rsn_flags().await?,
        })
    }
}

impl From<AccessPointSnapshot> for WirelessNetworkRecord {
    fn from(ap: AccessPointSnapshot) -> Self {
        let mut channel = channel_from_frequency(ap.frequency);
        channel.width = ap.bandwidth.map_or(ChannelWidth::Unknown, ChannelWidth::from);

        Self {
            ssid: decode_ssid(&ap.ssid),
            bssid: normalize_bssid(&ap.hw_address),
            rssi: dbm_from_strength(ap.strength),
            fastest_phy_mode: phy_mode_from_rate(ap.max_bitrate, channel.band),
            channel,
            // Not exported per access point by NetworkManager.
            country_code: None,
            security: security_from_flags(ap.flags, ap.wpa_flags, ap.rsn_flags),
        }
    }
}

/// The default Wi-Fi device as seen through NetworkManager.
#[derive(Debug, Clone)]
pub struct NmWirelessInterface {
    conn: Connection,
    interface: String,
    device: OwnedObjectPath,
    scan_timeout: Duration,
}

impl NmWirelessInterface {
    /// Returns the first Wi-Fi device NetworkManager reports.
    ///
    /// # Errors
    ///
    /// Returns `ScanError::NoWifiDevice` if there is none.
    pub async fn default_interface(conn: &Connection) -> Result<Self> {
        let nm = NMProxy::new(conn).await?;
        let devices = nm
            .get_devices()
            .await
            .map_err(|e| ScanError::DbusOperation {
                context: "failed to get device paths from NetworkManager".into(),
                source: e,
            })?;

        for dp in devices {
            let dev = NMDeviceProxy::builder(conn)
                .path(dp.clone())?
                .build()
                .await?;

            if dev.device_type().await? != device_type::WIFI {
                continue;
            }

            let interface = dev.interface().await?;
            if !dev.managed().await.unwrap_or(true) {
                debug!("Skipping unmanaged Wi-Fi device {interface}");
                continue;
            }

            debug!("Default Wi-Fi interface: {interface} ({})", dp.as_str());
            return Ok(Self {
                conn: conn.clone(),
                interface,
                device: dp,
                scan_timeout: timeouts::scan_complete_timeout(),
            });
        }

        Err(ScanError::NoWifiDevice)
    }

    /// Sets how long to wait for a requested scan to finish.
    #[must_use]
    pub fn with_scan_timeout(mut self, scan_timeout: Duration) -> Self {
        self.scan_timeout = scan_timeout;
        self
    }

    async fn read_access_points(
        &self,
        wifi: &NMWirelessProxy<'_>,
    ) -> Result<Vec<WirelessNetworkRecord>> {
        let mut records = Vec::new();

        for ap_path in wifi.access_points().await? {
            let ap = NMAccessPointProxy::builder(&self.conn)
                .path(ap_path.clone())?
                .build()
                .await?;

            match AccessPointSnapshot::read(&ap).await {
                Ok(snapshot) => records.push(snapshot.into()),
                // The access point went away between listing and reading.
                Err(ScanError::Dbus(e))
                    if method_error_name(&e) == Some(bus_names::UNKNOWN_OBJECT)
                        || method_error_name(&e) == Some(bus_names::UNKNOWN_METHOD) =>
                {
                    debug!("Access point {} vanished during scan", ap_path.as_str());
                }
                Err(e) => return Err(e),
            }
        }

        Ok(records)
    }
}

/// Reads `LastScan` straight from the bus.
///
/// The proxy cache is fed by the same `PropertiesChanged` signal the waiter
/// listens to, so it cannot tell whether a change was missed.
async fn read_last_scan(wifi: &NMWirelessProxy<'_>) -> Result<i64> {
    let props = PropertiesProxy::builder(wifi.inner().connection())
        .destination(bus_names::NM_SERVICE)?
        .path(wifi.inner().path().clone())?
        .build()
        .await?;
    let value = props
        .get(
            InterfaceName::from_static_str_unchecked(bus_names::NM_INTERFACE_WIRELESS),
            "LastScan",
        )
        .await
        .map_err(zbus::Error::from)?;
    Ok(i64::try_from(value).map_err(zbus::Error::from)?)
}

/// Decides what a refused or failed `RequestScan` means.
///
/// `NotAllowed` is also what NetworkManager answers when scanning is
/// rate-limited, so it counts as current results only if the device has
/// completed a scan before. Every other failure is surfaced.
pub(crate) fn scan_request_refused(
    error_name: Option<&str>,
    message: String,
    last_scan_ts: i64,
) -> Result<()> {
    if error_name == Some(bus_names::SCAN_NOT_ALLOWED) && last_scan_ts != last_scan::NEVER {
        Ok(())
    } else {
        Err(ScanError::ScanFailed(message))
    }
}

/// Returns `true` once `LastScan` has moved past its value before the request.
pub(crate) fn scan_completed(before: i64, now: i64) -> bool {
    now != before && now != last_scan::NEVER
}

/// Outcome of a wait that ran out of time, given a fresh `LastScan` reading.
pub(crate) fn scan_wait_expired(before: i64, now: i64) -> Result<()> {
    if scan_completed(before, now) {
        Ok(())
    } else {
        Err(ScanError::ScanTimeout)
    }
}

/// Requests a scan and waits for `LastScan` to move.
async fn request_scan_and_wait(wifi: &NMWirelessProxy<'_>, scan_timeout: Duration) -> Result<()> {
    // Subscribe FIRST so a fast scan cannot complete unobserved
    let changes = wifi.receive_last_scan_changed().await;
    let before = read_last_scan(wifi).await?;
    debug!("Last scan timestamp before request: {before}");

    if let Err(e) = wifi.request_scan(HashMap::new()).await {
        scan_request_refused(method_error_name(&e), e.to_string(), before)?;
        debug!("Scan request refused, using current results: {e}");
        return Ok(());
    }

    let completed = async move {
        let mut changes = pin!(changes);
        while let Some(change) = changes.next().await {
            match change.get().await {
                Ok(ts) if scan_completed(before, ts) => {
                    debug!("Scan completed at {ts}");
                    return Ok(());
                }
                Ok(_) => {}
                Err(e) => warn!("Failed to read LastScan change: {e}"),
            }
        }
        Err(ScanError::ScanFailed("LastScan change stream ended".into()))
    };

    let mut completed = pin!(completed.fuse());
    let mut timeout_delay = pin!(Delay::new(scan_timeout).fuse());

    select! {
        result = completed => result,
        _ = timeout_delay => {
            let now = read_last_scan(wifi).await?;
            if now == before {
                warn!("Scan did not complete within {scan_timeout:?}");
            }
            scan_wait_expired(before, now)
        }
    }
}

#[async_trait]
impl WirelessInterface for NmWirelessInterface {
    fn name(&self) -> &str {
        &self.interface
    }

    async fn scan_for_networks(&self) -> Result<Vec<WirelessNetworkRecord>> {
        let nm = NMProxy::new(&self.conn).await?;
        if !nm.wireless_enabled().await? {
            return Err(ScanError::ScanFailed("Wi-Fi is disabled".into()));
        }

        let wifi = NMWirelessProxy::builder(&self.conn)
            .path(self.device.clone())?
            .build()
            .await?;

        request_scan_and_wait(&wifi, self.scan_timeout).await?;

        let records = self.read_access_points(&wifi).await?;
        debug!("{} access points visible on {}", records.len(), self.interface);
        Ok(records)
    }
}
