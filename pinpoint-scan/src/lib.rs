use anyhow::Context;
use clap::{ArgAction, Parser};
use log::{debug, warn};
use std::time::Duration;

use pinpoint::{AuthorizationPolicy, ScanOptions, ScanSession};

#[derive(Parser, Debug)]
#[command(name = "pinpoint-scan")]
#[command(about = "List nearby Wi-Fi networks in the airport -s layout")]
#[command(disable_version_flag = true)]
#[command(version)]
struct Args {
    #[arg(short = 'V', long = "version", action = ArgAction::SetTrue)]
    version: bool,

    /// Location authorization polls (one per second) before giving up
    #[arg(
        long,
        value_name = "N",
        default_value_t = 60,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    max_attempts: u32,

    /// Seconds to wait for the scan to complete
    #[arg(long, value_name = "SECS", default_value_t = 15)]
    scan_timeout: u64,
}

impl Args {
    fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            authorization: AuthorizationPolicy::default().with_max_attempts(self.max_attempts),
            scan_timeout: Duration::from_secs(self.scan_timeout),
        }
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.version {
        println!("pinpoint-scan {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // stdout carries the report; logs go to stderr
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start runtime")?;

    runtime.block_on(scan(args.scan_options()))
}

async fn scan(options: ScanOptions) -> anyhow::Result<()> {
    let mut session = ScanSession::system(options)
        .await
        .context("failed to open the wireless interface")?;

    let mut out = std::io::stdout().lock();
    let result = session.run(&mut out).await;

    if let Err(e) = session.close().await {
        warn!("Failed to release location client: {e}");
    }

    let rows = result?;
    debug!("Listed {rows} networks");
    Ok(())
}
