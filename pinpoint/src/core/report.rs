//! Scan table rendering.
//!
//! The layout reproduces the classic `airport -s` report: a fixed header
//! followed by one line per named network, columns separated by single
//! spaces. Fields longer than their column are not truncated.

use std::io::Write;

use crate::api::models::WirelessNetworkRecord;
use crate::types::constants::columns;

const BLANK_COUNTRY_CODE: &str = "--";

/// Returns the table header line (without newline).
pub fn header() -> String {
    format!(
        "{:>ssid$} {:<bssid$} RSSI CHANNEL HT CC SECURITY",
        "SSID",
        "BSSID",
        ssid = columns::SSID,
        bssid = columns::BSSID,
    )
}

/// Renders one network as a table line (without newline).
///
/// Returns `None` for networks without an SSID; those are never listed.
pub fn render_row(record: &WirelessNetworkRecord) -> Option<String> {
    let ssid = record.ssid.as_deref()?;
    let bssid = record.bssid.as_deref().unwrap_or("");
    let ht = if record.supports_high_throughput() {
        "Y"
    } else {
        "N"
    };
    let cc = record.country_code.as_deref().unwrap_or(BLANK_COUNTRY_CODE);

    Some(format!(
        "{:>ssid_w$} {:<bssid_w$} {:<rssi_w$} {:<channel_w$} {:<ht_w$} {:<cc_w$} {}",
        ssid,
        bssid,
        record.rssi.to_string(),
        record.channel.to_string(),
        ht,
        cc,
        record.security,
        ssid_w = columns::SSID,
        bssid_w = columns::BSSID,
        rssi_w = columns::RSSI,
        channel_w = columns::CHANNEL,
        ht_w = columns::HT,
        cc_w = columns::CC,
    ))
}

/// Writes the header and one line per named network, in the given order.
///
/// Returns the number of network rows written.
pub fn write_report<W: Write + ?Sized>(
    out: &mut W,
    records: &[WirelessNetworkRecord],
) -> std::io::Result<usize> {
    writeln!(out, "{}", header())?;

    let mut rows = 0;
    for line in records.iter().filter_map(render_row) {
        writeln!(out, "{line}")?;
        rows += 1;
    }

    out.flush()?;
    Ok(rows)
}
