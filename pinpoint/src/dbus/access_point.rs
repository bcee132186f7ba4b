//! NetworkManager Access Point proxy.

use zbus::{Result, proxy};

/// Proxy for access point interface.
///
/// Every property the scan table needs lives here: SSID, BSSID, signal,
/// frequency, rate and the three security bitmasks.
#[proxy(
    interface = "org.freedesktop.NetworkManager.AccessPoint",
    default_service = "org.freedesktop.NetworkManager"
)]
pub trait NMAccessPoint {
    /// SSID as raw bytes (may be empty or not valid UTF-8).
    #[zbus(property)]
    fn ssid(&self) -> Result<Vec<u8>>;

    /// Signal strength as percentage (0-100).
    #[zbus(property)]
    fn strength(&self) -> Result<u8>;

    /// BSSID (MAC address) of the access point.
    #[zbus(property)]
    fn hw_address(&self) -> Result<String>;

    /// General capability flags (bit 0 = privacy).
    #[zbus(property)]
    fn flags(&self) -> Result<u32>;

    /// Security flags from the WPA information element.
    #[zbus(property)]
    fn wpa_flags(&self) -> Result<u32>;

    /// Security flags from the RSN information element.
    #[zbus(property)]
    fn rsn_flags(&self) -> Result<u32>;

    /// Operating frequency in MHz.
    #[zbus(property)]
    fn frequency(&self) -> Result<u32>;

    /// Maximum supported bitrate in Kbit/s.
    #[zbus(property)]
    fn max_bitrate(&self) -> Result<u32>;

    /// Channel bandwidth in MHz.
    /// Only exported by NetworkManager 1.46 and newer.
    #[zbus(property)]
    fn bandwidth(&self) -> Result<u32>;
}
