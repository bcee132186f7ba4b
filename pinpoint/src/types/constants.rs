//! Constants for D-Bus interface values and report layout.
//!
//! These constants correspond to the numeric codes used by NetworkManager's
//! and GeoClue2's D-Bus APIs, plus the fixed column widths of the scan table.

/// NetworkManager device type constants.
pub mod device_type {
    pub const WIFI: u32 = 2;
}

/// Access point capability flags (`NM80211ApFlags`).
pub mod ap_flags {
    pub const PRIVACY: u32 = 0x1;
}

/// GeoClue2 accuracy levels (`GClueAccuracyLevel`).
pub mod accuracy_level {
    pub const NONE: u32 = 0;
    pub const COUNTRY: u32 = 1;
}

/// D-Bus names used when talking to the location and network services.
pub mod bus_names {
    pub const GEOCLUE_DESKTOP_ID: &str = "pinpoint";
    pub const ACCESS_DENIED: &str = "org.freedesktop.DBus.Error.AccessDenied";
    pub const NM_INTERFACE_WIRELESS: &str = "org.freedesktop.NetworkManager.Device.Wireless";
    pub const NM_SERVICE: &str = "org.freedesktop.NetworkManager";
    pub const SCAN_NOT_ALLOWED: &str = "org.freedesktop.NetworkManager.Device.NotAllowed";
    pub const UNKNOWN_OBJECT: &str = "org.freedesktop.DBus.Error.UnknownObject";
    pub const UNKNOWN_METHOD: &str = "org.freedesktop.DBus.Error.UnknownMethod";
}

/// Authorization gate defaults.
pub mod authorization {
    use std::time::Duration;

    /// Number of status polls before giving up.
    pub const MAX_ATTEMPTS: u32 = 60;

    const POLL_INTERVAL_SECS: u64 = 1;

    /// Delay between two status polls.
    pub fn poll_interval() -> Duration {
        Duration::from_secs(POLL_INTERVAL_SECS)
    }
}

/// Timeout constants for signal-based waiting.
/// NetworkManager `LastScan` sentinel values.
pub mod last_scan {
    /// The device never completed a scan.
    pub const NEVER: i64 = -1;
}

pub mod timeouts {
    use std::time::Duration;

    /// Maximum time to wait for a requested scan to finish (15 seconds).
    const SCAN_COMPLETE_TIMEOUT_SECS: u64 = 15;

    /// Returns the scan completion timeout duration.
    pub fn scan_complete_timeout() -> Duration {
        Duration::from_secs(SCAN_COMPLETE_TIMEOUT_SECS)
    }
}

/// Column widths of the scan table.
pub mod columns {
    pub const SSID: usize = 32;
    pub const BSSID: usize = 17;
    pub const RSSI: usize = 4;
    pub const CHANNEL: usize = 7;
    pub const HT: usize = 2;
    pub const CC: usize = 2;
}

/// WiFi frequency constants (MHz)
pub mod frequency {
    pub const BAND_2_4_START: u32 = 2412;
    pub const BAND_2_4_END: u32 = 2472;
    pub const BAND_2_4_CH14: u32 = 2484;
    pub const BAND_5_START: u32 = 5150;
    pub const BAND_5_END: u32 = 5925;
    pub const BAND_6_START: u32 = 5955;
    pub const BAND_6_END: u32 = 7115;
    pub const CHANNEL_SPACING: u32 = 5;
}

/// Rate thresholds (Kbit/s) used to infer the fastest PHY mode from
/// an access point's advertised maximum bitrate.
pub mod rate {
    pub const DSSS_MAX: u32 = 11_000;
    pub const OFDM_MAX: u32 = 54_000;
    pub const HT_MAX: u32 = 600_000;
    pub const VHT_MAX: u32 = 3_466_800;
    pub const HE_MAX: u32 = 9_607_800;
}

/// Signal strength conversion constants
pub mod signal {
    /// dBm value that maps to 0% strength.
    pub const FLOOR_DBM: i32 = -100;
}
