use std::process::ExitCode;

fn main() -> ExitCode {
    match pinpoint_scan::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("pinpoint-scan: {e:#}");
            ExitCode::FAILURE
        }
    }
}
