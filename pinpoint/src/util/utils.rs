//! Utility functions for Wi-Fi data conversion.
//!
//! Provides helpers for converting NetworkManager's access point properties
//! into scan record fields: frequency to channel, strength to dBm, rate to
//! PHY mode, security bitmasks to a typed descriptor, SSID bytes to strings.

use log::warn;
use std::str;

use crate::api::models::{
    Channel, ChannelBand, Cipher, KeyManagement, PhyMode, Security, SecurityInfo,
};
use crate::types::constants::{ap_flags, frequency, rate, signal};
use crate::types::flags::ApSecurityFlags;

/// Converts a Wi-Fi frequency in MHz to a channel number.
///
/// Supports 2.4GHz (channels 1-14), 5GHz, and 6GHz bands.
/// Returns `None` for frequencies outside known Wi-Fi bands.
pub(crate) fn channel_from_freq(mhz: u32) -> Option<u16> {
    match mhz {
        frequency::BAND_2_4_START..=frequency::BAND_2_4_END => {
            Some(((mhz - frequency::BAND_2_4_START) / frequency::CHANNEL_SPACING + 1) as u16)
        }
        frequency::BAND_2_4_CH14 => Some(14),
        frequency::BAND_5_START..=frequency::BAND_5_END => {
            Some(((mhz - 5000) / frequency::CHANNEL_SPACING) as u16)
        }
        frequency::BAND_6_START..=frequency::BAND_6_END => {
            Some(((mhz - frequency::BAND_6_START) / frequency::CHANNEL_SPACING + 1) as u16)
        }
        _ => None,
    }
}

/// Returns the band a frequency in MHz belongs to.
pub(crate) fn band_from_freq(mhz: u32) -> ChannelBand {
    match mhz {
        frequency::BAND_2_4_START..=frequency::BAND_2_4_CH14 => ChannelBand::Band2GHz,
        frequency::BAND_5_START..=frequency::BAND_5_END => ChannelBand::Band5GHz,
        frequency::BAND_6_START..=frequency::BAND_6_END => ChannelBand::Band6GHz,
        _ => ChannelBand::Unknown,
    }
}

/// Builds a channel descriptor from a frequency in MHz.
pub(crate) fn channel_from_frequency(mhz: u32) -> Channel {
    Channel::new(channel_from_freq(mhz).unwrap_or(0), band_from_freq(mhz))
}

/// Converts NetworkManager's strength percentage (0-100) to dBm.
///
/// Inverse of the usual `quality = 2 * (dBm + 100)` mapping, so 100% is
/// -50 dBm and 0% is -100 dBm.
pub(crate) fn dbm_from_strength(strength: u8) -> i32 {
    i32::from(strength.min(100)) / 2 + signal::FLOOR_DBM
}

/// Infers the fastest PHY mode from the maximum bitrate (Kbit/s) and band.
///
/// NetworkManager does not export the PHY mode, but the advertised
/// maximum rate is bounded by it.
pub(crate) fn phy_mode_from_rate(max_bitrate: u32, band: ChannelBand) -> PhyMode {
    let mode = match max_bitrate {
        0 => PhyMode::None,
        r if r <= rate::DSSS_MAX => PhyMode::B,
        r if r <= rate::OFDM_MAX => match band {
            ChannelBand::Band2GHz => PhyMode::G,
            _ => PhyMode::A,
        },
        r if r <= rate::HT_MAX => PhyMode::N,
        r if r <= rate::VHT_MAX => match band {
            ChannelBand::Band5GHz => PhyMode::Ac,
            _ => PhyMode::Ax,
        },
        r if r <= rate::HE_MAX => PhyMode::Ax,
        _ => PhyMode::Be,
    };

    // 6GHz operation requires 802.11ax.
    if band == ChannelBand::Band6GHz && mode < PhyMode::Ax {
        PhyMode::Ax
    } else {
        mode
    }
}

/// Decode SSID bytes, returning `None` if empty or invalid UTF-8.
pub(crate) fn decode_ssid(bytes: &[u8]) -> Option<String> {
    if bytes.is_empty() {
        return None;
    }

    match str::from_utf8(bytes) {
        Ok(s) => Some(s.to_owned()),
        Err(e) => {
            warn!("Invalid UTF-8 in SSID, treating network as unnamed: {e}");
            None
        }
    }
}

/// Normalizes a BSSID string, returning `None` if empty.
pub(crate) fn normalize_bssid(hw_address: &str) -> Option<String> {
    let trimmed = hw_address.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_ascii_lowercase())
    }
}

fn security_info(flags: ApSecurityFlags) -> SecurityInfo {
    let mut auth = Vec::new();
    if flags.contains(ApSecurityFlags::KEY_MGMT_PSK) {
        auth.push(KeyManagement::Psk);
    }
    if flags.intersects(ApSecurityFlags::KEY_MGMT_802_1X | ApSecurityFlags::KEY_MGMT_EAP_SUITE_B_192)
    {
        auth.push(KeyManagement::Ieee8021x);
    }
    if flags.contains(ApSecurityFlags::KEY_MGMT_SAE) {
        auth.push(KeyManagement::Sae);
    }
    if flags.intersects(ApSecurityFlags::KEY_MGMT_OWE | ApSecurityFlags::KEY_MGMT_OWE_TM) {
        auth.push(KeyManagement::Owe);
    }

    let mut unicast = Vec::new();
    if flags.contains(ApSecurityFlags::PAIR_CCMP) {
        unicast.push(Cipher::Ccmp);
    }
    if flags.contains(ApSecurityFlags::PAIR_TKIP) {
        unicast.push(Cipher::Tkip);
    }
    if flags.contains(ApSecurityFlags::PAIR_WEP104) {
        unicast.push(Cipher::Wep104);
    }
    if flags.contains(ApSecurityFlags::PAIR_WEP40) {
        unicast.push(Cipher::Wep40);
    }

    // Strongest advertised group cipher wins.
    let group = if flags.contains(ApSecurityFlags::GROUP_CCMP) {
        Some(Cipher::Ccmp)
    } else if flags.contains(ApSecurityFlags::GROUP_TKIP) {
        Some(Cipher::Tkip)
    } else if flags.contains(ApSecurityFlags::GROUP_WEP104) {
        Some(Cipher::Wep104)
    } else if flags.contains(ApSecurityFlags::GROUP_WEP40) {
        Some(Cipher::Wep40)
    } else {
        None
    };

    SecurityInfo {
        auth,
        unicast,
        group,
    }
}

/// Builds a security descriptor from an access point's `Flags`,
/// `WpaFlags` and `RsnFlags` properties.
pub(crate) fn security_from_flags(flags: u32, wpa_flags: u32, rsn_flags: u32) -> Security {
    let wpa = ApSecurityFlags::from_bits_truncate(wpa_flags);
    let rsn = ApSecurityFlags::from_bits_truncate(rsn_flags);

    match (wpa.is_empty(), rsn.is_empty()) {
        (false, false) => Security::Mixed {
            wpa: security_info(wpa),
            rsn: security_info(rsn),
        },
        (false, true) => Security::Wpa(security_info(wpa)),
        (true, false) => Security::Rsn(security_info(rsn)),
        (true, true) if (flags & ap_flags::PRIVACY) != 0 => Security::Wep,
        (true, true) => Security::None,
    }
}

/// Returns the D-Bus error name of a failed method call, if any.
pub(crate) fn method_error_name(err: &zbus::Error) -> Option<&str> {
    match err {
        zbus::Error::MethodError(name, _, _) => Some(name.as_str()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_from_freq_2_4ghz() {
        assert_eq!(channel_from_freq(2412), Some(1));
        assert_eq!(channel_from_freq(2437), Some(6));
        assert_eq!(channel_from_freq(2472), Some(13));
        assert_eq!(channel_from_freq(2484), Some(14));
    }

    #[test]
    fn test_channel_from_freq_5ghz() {
        assert_eq!(channel_from_freq(5180), Some(36));
        assert_eq!(channel_from_freq(5745), Some(149));
    }

    #[test]
    fn test_channel_from_freq_6ghz() {
        assert_eq!(channel_from_freq(5955), Some(1));
        assert_eq!(channel_from_freq(6115), Some(33));
    }

    #[test]
    fn test_channel_from_freq_invalid() {
        assert_eq!(channel_from_freq(1000), None);
        assert_eq!(channel_from_freq(9999), None);
    }

    #[test]
    fn test_channel_from_frequency_unknown_band() {
        let ch = channel_from_frequency(1000);
        assert_eq!(ch.number, 0);
        assert_eq!(ch.band, ChannelBand::Unknown);
    }

    #[test]
    fn test_band_from_freq() {
        assert_eq!(band_from_freq(2437), ChannelBand::Band2GHz);
        assert_eq!(band_from_freq(2484), ChannelBand::Band2GHz);
        assert_eq!(band_from_freq(5180), ChannelBand::Band5GHz);
        assert_eq!(band_from_freq(6115), ChannelBand::Band6GHz);
        assert_eq!(band_from_freq(900), ChannelBand::Unknown);
    }

    #[test]
    fn test_dbm_from_strength() {
        assert_eq!(dbm_from_strength(100), -50);
        assert_eq!(dbm_from_strength(90), -55);
        assert_eq!(dbm_from_strength(0), -100);
        assert_eq!(dbm_from_strength(255), -50);
    }

    #[test]
    fn test_phy_mode_from_rate() {
        assert_eq!(phy_mode_from_rate(0, ChannelBand::Band2GHz), PhyMode::None);
        assert_eq!(phy_mode_from_rate(11_000, ChannelBand::Band2GHz), PhyMode::B);
        assert_eq!(phy_mode_from_rate(54_000, ChannelBand::Band2GHz), PhyMode::G);
        assert_eq!(phy_mode_from_rate(54_000, ChannelBand::Band5GHz), PhyMode::A);
        assert_eq!(phy_mode_from_rate(144_400, ChannelBand::Band2GHz), PhyMode::N);
        assert_eq!(phy_mode_from_rate(866_700, ChannelBand::Band5GHz), PhyMode::Ac);
        assert_eq!(phy_mode_from_rate(1_147_000, ChannelBand::Band2GHz), PhyMode::Ax);
        assert_eq!(phy_mode_from_rate(4_803_900, ChannelBand::Band5GHz), PhyMode::Ax);
        assert_eq!(phy_mode_from_rate(11_529_400, ChannelBand::Band6GHz), PhyMode::Be);
        assert_eq!(phy_mode_from_rate(54_000, ChannelBand::Band6GHz), PhyMode::Ax);
    }

    #[test]
    fn test_decode_ssid() {
        assert_eq!(decode_ssid(b"MyNetwork"), Some("MyNetwork".to_string()));
        assert_eq!(decode_ssid(b""), None);
        assert_eq!(decode_ssid(&[0xff, 0xfe]), None);
        assert_eq!(decode_ssid("café".as_bytes()), Some("café".to_string()));
    }

    #[test]
    fn test_normalize_bssid() {
        assert_eq!(
            normalize_bssid("AA:BB:CC:DD:EE:FF"),
            Some("aa:bb:cc:dd:ee:ff".to_string())
        );
        assert_eq!(normalize_bssid(""), None);
        assert_eq!(normalize_bssid("  "), None);
    }

    #[test]
    fn test_security_open_and_wep() {
        assert_eq!(security_from_flags(0, 0, 0), Security::None);
        assert_eq!(security_from_flags(ap_flags::PRIVACY, 0, 0), Security::Wep);
    }

    #[test]
    fn test_security_wpa2_psk() {
        let rsn = (ApSecurityFlags::KEY_MGMT_PSK
            | ApSecurityFlags::PAIR_CCMP
            | ApSecurityFlags::GROUP_CCMP)
            .bits();
        let sec = security_from_flags(ap_flags::PRIVACY, 0, rsn);
        assert_eq!(sec.to_string(), "WPA2(PSK/AES/AES)");
    }

    #[test]
    fn test_security_mixed_mode() {
        let wpa = (ApSecurityFlags::KEY_MGMT_PSK
            | ApSecurityFlags::PAIR_TKIP
            | ApSecurityFlags::GROUP_TKIP)
            .bits();
        let rsn = (ApSecurityFlags::KEY_MGMT_PSK
            | ApSecurityFlags::PAIR_CCMP
            | ApSecurityFlags::PAIR_TKIP
            | ApSecurityFlags::GROUP_TKIP)
            .bits();
        let sec = security_from_flags(ap_flags::PRIVACY, wpa, rsn);
        assert_eq!(sec.to_string(), "WPA(PSK/TKIP/TKIP) WPA2(PSK/AES,TKIP/TKIP)");
    }

    #[test]
    fn test_security_wpa3_and_enterprise() {
        let sae = (ApSecurityFlags::KEY_MGMT_SAE
            | ApSecurityFlags::PAIR_CCMP
            | ApSecurityFlags::GROUP_CCMP)
            .bits();
        assert_eq!(
            security_from_flags(ap_flags::PRIVACY, 0, sae).to_string(),
            "WPA3(SAE/AES/AES)"
        );

        let eap = (ApSecurityFlags::KEY_MGMT_802_1X | ApSecurityFlags::PAIR_CCMP).bits();
        assert_eq!(
            security_from_flags(ap_flags::PRIVACY, 0, eap).to_string(),
            "WPA2(802.1X/AES/)"
        );
    }

    #[test]
    fn test_method_error_name_non_method_error() {
        let err = zbus::Error::Failure("boom".into());
        assert_eq!(method_error_name(&err), None);
    }
}
