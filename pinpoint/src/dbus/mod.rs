//! D-Bus proxy interfaces for NetworkManager and GeoClue2.
//!
//! This module contains low-level D-Bus proxy definitions for the two
//! system services a scan depends on:
//!
//! - `/org/freedesktop/NetworkManager` - device enumeration and Wi-Fi scanning
//! - `/org/freedesktop/GeoClue2/Manager` - location clients and authorization

mod access_point;
mod device;
mod geoclue;
mod main_nm;
mod wireless;

pub(crate) use access_point::NMAccessPointProxy;
pub(crate) use device::NMDeviceProxy;
pub(crate) use geoclue::{GeoClueClientProxy, GeoClueManagerProxy};
pub(crate) use main_nm::NMProxy;
pub(crate) use wireless::NMWirelessProxy;
