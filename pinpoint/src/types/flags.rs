//! Typed views over NetworkManager's access point security bitmasks.

use bitflags::bitflags;

bitflags! {
    /// Access point security flags (`NM80211ApSecurityFlags`), shared by
    /// the `WpaFlags` and `RsnFlags` properties.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ApSecurityFlags: u32 {
        const PAIR_WEP40 = 0x1;
        const PAIR_WEP104 = 0x2;
        const PAIR_TKIP = 0x4;
        const PAIR_CCMP = 0x8;
        const GROUP_WEP40 = 0x10;
        const GROUP_WEP104 = 0x20;
        const GROUP_TKIP = 0x40;
        const GROUP_CCMP = 0x80;
        const KEY_MGMT_PSK = 0x100;
        const KEY_MGMT_802_1X = 0x200;
        const KEY_MGMT_SAE = 0x400;
        const KEY_MGMT_OWE = 0x800;
        const KEY_MGMT_OWE_TM = 0x1000;
        const KEY_MGMT_EAP_SUITE_B_192 = 0x2000;
    }
}
