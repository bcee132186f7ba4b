//! Wi-Fi scan reports in the layout of the classic `airport -s` tool.
//!
//! A scan runs in two stages:
//!
//! 1. **Authorization gate**: location updates are started and the location
//!    authorization status is polled once per second until it is granted or
//!    the retry budget (60 polls) runs out.
//! 2. **Scan and format**: the default wireless interface performs a single
//!    scan and every named network becomes one fixed-width table row.
//!
//! On Linux the location service is GeoClue2 and the wireless interface is
//! the first Wi-Fi device NetworkManager reports, both reached over the
//! system D-Bus. Both sit behind traits ([`LocationAuthorizer`],
//! [`WirelessInterface`]) so other backends and test doubles plug in
//! without touching the report code.
//!
//! # Example
//!
//! ```no_run
//! use pinpoint::{ScanOptions, ScanSession};
//!
//! # async fn example() -> pinpoint::Result<()> {
//! let mut session = ScanSession::system(ScanOptions::default()).await?;
//!
//! session.authorize().await?;
//! for net in session.scan().await? {
//!     println!("{:?} {} dBm {}", net.ssid, net.rssi, net.security);
//! }
//!
//! session.close().await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Report layout
//!
//! ```text
//!                             SSID BSSID             RSSI CHANNEL HT CC SECURITY
//!                             Home aa:bb:cc:dd:ee:ff -55  36      Y  -- WPA2(PSK/AES/AES)
//! ```
//!
//! Networks without an SSID are skipped. A missing BSSID renders as blank
//! padding and a missing country code as `--`.
//!
//! # Logging
//!
//! This crate uses the [`log`](https://docs.rs/log) facade for logging. To see
//! log output, add a logging implementation like `env_logger`. Nothing is ever
//! logged to stdout by this crate.

// Internal implementation modules
mod core;
mod dbus;
mod types;
mod util;

// Public API modules
pub mod api;

// Re-exported public API
pub use api::models::{
    AuthorizationStatus, Channel, ChannelBand, ChannelWidth, Cipher, KeyManagement, PhyMode,
    ScanError, Security, SecurityInfo, WirelessNetworkRecord,
};
pub use api::session::{ScanOptions, ScanSession};
pub use crate::core::authorization::{
    AuthorizationPolicy, LocationAuthorizer, wait_for_authorization,
};
pub use crate::core::location::GeoClueAuthorizer;
pub use crate::core::report::{header, render_row, write_report};
pub use crate::core::scan::{NmWirelessInterface, WirelessInterface};

/// A specialized `Result` type for scan operations.
pub type Result<T> = std::result::Result<T, ScanError>;
