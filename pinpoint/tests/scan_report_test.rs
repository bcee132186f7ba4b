//! End-to-end tests of the gate, scan and report using scripted platform
//! services. No D-Bus is involved.

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use pinpoint::{
    AuthorizationPolicy, AuthorizationStatus, Channel, ChannelBand, LocationAuthorizer, PhyMode,
    ScanError, ScanSession, Security, WirelessInterface, WirelessNetworkRecord,
};

/// Denies the first `deny_polls` polls, then grants (if `grants`).
#[derive(Default)]
struct ScriptedAuthorizer {
    deny_polls: u32,
    grants: bool,
    polls: u32,
    started: bool,
    stops: Arc<AtomicU32>,
}

impl ScriptedAuthorizer {
    fn granting_on_poll(n: u32) -> Self {
        Self {
            deny_polls: n - 1,
            grants: true,
            ..Default::default()
        }
    }

    fn never_granting() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LocationAuthorizer for ScriptedAuthorizer {
    async fn start_updating_location(&mut self) -> pinpoint::Result<()> {
        self.started = true;
        Ok(())
    }

    async fn authorization_status(&mut self) -> pinpoint::Result<AuthorizationStatus> {
        self.polls += 1;
        if self.grants && self.polls > self.deny_polls {
            Ok(AuthorizationStatus::AuthorizedWhenInUse)
        } else {
            Ok(AuthorizationStatus::Denied)
        }
    }

    async fn stop_updating_location(&mut self) -> pinpoint::Result<()> {
        self.started = false;
        self.stops.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct StubInterface {
    records: Vec<WirelessNetworkRecord>,
}

#[async_trait]
impl WirelessInterface for StubInterface {
    fn name(&self) -> &str {
        "stub0"
    }

    async fn scan_for_networks(&self) -> pinpoint::Result<Vec<WirelessNetworkRecord>> {
        Ok(self.records.clone())
    }
}

/// Builds records from textual descriptions, like a platform that only
/// exposes a debug string for security.
struct DescribedInterface {
    descriptions: Vec<&'static str>,
}

#[async_trait]
impl WirelessInterface for DescribedInterface {
    fn name(&self) -> &str {
        "described0"
    }

    async fn scan_for_networks(&self) -> pinpoint::Result<Vec<WirelessNetworkRecord>> {
        self.descriptions
            .iter()
            .map(|d| {
                Ok(WirelessNetworkRecord {
                    security: Security::from_description(d)?,
                    ..network("Described")
                })
            })
            .collect()
    }
}

struct FailingInterface;

#[async_trait]
impl WirelessInterface for FailingInterface {
    fn name(&self) -> &str {
        "broken0"
    }

    async fn scan_for_networks(&self) -> pinpoint::Result<Vec<WirelessNetworkRecord>> {
        Err(ScanError::ScanFailed("radio busy".into()))
    }
}

fn network(ssid: &str) -> WirelessNetworkRecord {
    WirelessNetworkRecord {
        ssid: Some(ssid.into()),
        bssid: Some("aa:bb:cc:dd:ee:ff".into()),
        rssi: -55,
        channel: Channel::new(11, ChannelBand::Band2GHz),
        fastest_phy_mode: PhyMode::N,
        country_code: Some("US".into()),
        security: Security::Described("WPA2".into()),
    }
}

fn fast_policy(max_attempts: u32) -> AuthorizationPolicy {
    AuthorizationPolicy::default()
        .with_max_attempts(max_attempts)
        .with_poll_interval(Duration::ZERO)
}

async fn report<W: WirelessInterface>(interface: W) -> pinpoint::Result<String> {
    let mut session = ScanSession::new(
        ScriptedAuthorizer::granting_on_poll(1),
        interface,
        fast_policy(3),
    );
    let mut out = Vec::new();
    session.run(&mut out).await?;
    session.close().await?;
    Ok(String::from_utf8(out).expect("report is UTF-8"))
}

fn rows(text: &str) -> Vec<&str> {
    text.lines().skip(1).collect()
}

const HEADER: &str =
    "                            SSID BSSID             RSSI CHANNEL HT CC SECURITY";

#[tokio::test]
async fn hidden_networks_are_skipped_but_header_remains() {
    let mut hidden = network("ignored");
    hidden.ssid = None;

    let text = report(StubInterface {
        records: vec![hidden],
    })
    .await
    .unwrap();

    assert_eq!(text, format!("{HEADER}\n"));
}

#[tokio::test]
async fn rows_keep_platform_order() {
    let text = report(StubInterface {
        records: vec![network("Zeta"), network("Alpha"), network("Mid")],
    })
    .await
    .unwrap();

    let names: Vec<&str> = rows(&text)
        .iter()
        .map(|r| r[..32].trim_start())
        .collect();
    assert_eq!(names, ["Zeta", "Alpha", "Mid"]);
}

#[tokio::test]
async fn rssi_is_left_justified_to_four() {
    let text = report(StubInterface {
        records: vec![network("Home")],
    })
    .await
    .unwrap();

    let row = rows(&text)[0];
    assert_eq!(&row[51..55], "-55 ");
}

#[tokio::test]
async fn bssid_column_padding() {
    let mut anonymous = network("NoMac");
    anonymous.bssid = None;

    let text = report(StubInterface {
        records: vec![network("Home"), anonymous],
    })
    .await
    .unwrap();

    let rows = rows(&text);
    assert_eq!(&rows[0][33..50], "aa:bb:cc:dd:ee:ff");
    assert_eq!(&rows[1][33..50], " ".repeat(17));
}

#[tokio::test]
async fn ht_and_country_code_columns() {
    let mut legacy = network("Legacy");
    legacy.fastest_phy_mode = PhyMode::G;
    legacy.country_code = None;

    let text = report(StubInterface {
        records: vec![network("Modern"), legacy],
    })
    .await
    .unwrap();

    let rows = rows(&text);
    // ssid(32) bssid(17) rssi(4) channel(7) joined by spaces
    assert_eq!(&rows[0][64..66], "Y ");
    assert_eq!(&rows[0][67..69], "US");
    assert_eq!(&rows[1][64..66], "N ");
    assert_eq!(&rows[1][67..69], "--");
}

#[tokio::test]
async fn security_from_description() {
    let text = report(DescribedInterface {
        descriptions: vec!["<CWNetwork> [ssid=Described, security=WPA2,unicast=AES, rssi=-55]"],
    })
    .await
    .unwrap();

    assert!(rows(&text)[0].ends_with(" US WPA2"));
}

#[tokio::test]
async fn description_without_security_is_a_typed_error() {
    let err = report(DescribedInterface {
        descriptions: vec!["[ssid=Described, security=WPA2,]", "[ssid=Described, rssi=-55]"],
    })
    .await
    .unwrap_err();

    assert!(matches!(err, ScanError::MalformedRecord(_)));
}

#[tokio::test]
async fn scan_errors_are_surfaced() {
    let err = report(FailingInterface).await.unwrap_err();
    assert!(matches!(err, ScanError::ScanFailed(ref msg) if msg == "radio busy"));
}

#[tokio::test]
async fn identical_scans_produce_identical_output() {
    let records = vec![network("Home"), network("Cafe")];
    let first = report(StubInterface {
        records: records.clone(),
    })
    .await
    .unwrap();
    let second = report(StubInterface { records }).await.unwrap();

    assert_eq!(first.as_bytes(), second.as_bytes());
}

#[tokio::test]
async fn authorization_granted_on_last_allowed_poll() {
    let mut auth = ScriptedAuthorizer::granting_on_poll(6);

    let status = pinpoint::wait_for_authorization(&mut auth, &fast_policy(6))
        .await
        .unwrap();

    assert_eq!(status, AuthorizationStatus::AuthorizedWhenInUse);
    assert_eq!(auth.polls, 6);
}

#[tokio::test]
async fn authorization_never_granted_times_out_without_output() {
    let mut session = ScanSession::new(
        ScriptedAuthorizer::never_granting(),
        StubInterface {
            records: vec![network("Home")],
        },
        fast_policy(6),
    );

    let mut out = Vec::new();
    let err = session.run(&mut out).await.unwrap_err();

    assert!(matches!(
        err,
        ScanError::AuthorizationTimeout {
            attempts: 6,
            last_status: AuthorizationStatus::Denied
        }
    ));
    assert!(out.is_empty());
    assert!(err.to_string().contains("after 6 attempts"));
}

#[tokio::test]
async fn gate_polls_at_the_configured_interval() {
    let policy = AuthorizationPolicy::default()
        .with_max_attempts(3)
        .with_poll_interval(Duration::from_millis(20));
    let mut auth = ScriptedAuthorizer::granting_on_poll(3);

    let started = std::time::Instant::now();
    pinpoint::wait_for_authorization(&mut auth, &policy)
        .await
        .unwrap();

    assert_eq!(auth.polls, 3);
    assert!(auth.started);
    // Two sleeps between three polls.
    assert!(started.elapsed() >= Duration::from_millis(40));
}

#[tokio::test]
async fn close_after_run_stops_location_updates_once() {
    let auth = ScriptedAuthorizer::granting_on_poll(2);
    let stops = Arc::clone(&auth.stops);
    let mut session = ScanSession::new(
        auth,
        StubInterface {
            records: vec![network("Home")],
        },
        fast_policy(3),
    );

    let mut out = Vec::new();
    assert_eq!(session.run(&mut out).await.unwrap(), 1);
    assert_eq!(stops.load(Ordering::SeqCst), 0);

    session.close().await.unwrap();
    assert_eq!(stops.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn close_after_authorization_timeout_still_stops_updates() {
    let auth = ScriptedAuthorizer::never_granting();
    let stops = Arc::clone(&auth.stops);
    let mut session = ScanSession::new(
        auth,
        StubInterface {
            records: vec![network("Home")],
        },
        fast_policy(2),
    );

    let mut out = Vec::new();
    let err = session.run(&mut out).await.unwrap_err();
    assert!(matches!(err, ScanError::AuthorizationTimeout { .. }));

    session.close().await.unwrap();
    assert_eq!(stops.load(Ordering::SeqCst), 1);
    assert!(out.is_empty());
}
