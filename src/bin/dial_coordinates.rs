use phonelink_dialer::settings::{DialerSettings, LocatorMode};
use std::process::ExitCode;

fn main() -> ExitCode {
    phonelink_dialer::init_tracing();

    match phonelink_dialer::run(LocatorMode::Coordinates, DialerSettings::load()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
