use pinpoint::{ScanOptions, ScanSession};

#[tokio::main(flavor = "current_thread")]
async fn main() -> pinpoint::Result<()> {
    let mut session = ScanSession::system(ScanOptions::default()).await?;

    println!("Waiting for location authorization...");
    session.authorize().await?;

    println!("Scanning on {}...", pinpoint::WirelessInterface::name(session.interface()));
    let networks = session.scan().await?;
    for net in &networks {
        println!(
            "{:30} {:>4} dBm ch {:<3} {} {}",
            net.ssid.as_deref().unwrap_or("<hidden>"),
            net.rssi,
            net.channel,
            net.fastest_phy_mode,
            net.security
        );
    }

    session.close().await
}
