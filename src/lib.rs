pub mod automation;
pub mod core;
pub mod driver;
pub mod error;
pub mod settings;

use automation::context::AutoGuiDesktop;
use automation::locator::{FixedLocator, ImageLocator};
use driver::{Driver, RunSummary};
use error::RunError;
use settings::{DialerSettings, LocatorMode};

/// Console diagnostics; RUST_LOG overrides the default `warn` level
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();
}

/// Dial the whole contacts file against the live desktop
pub fn run(mode: LocatorMode, settings: DialerSettings) -> Result<RunSummary, RunError> {
    let desktop = AutoGuiDesktop::new()?;

    let summary = match mode {
        LocatorMode::Coordinates => {
            let locator = FixedLocator::new(settings.coordinates.clone());
            Driver::new(settings, desktop, locator).run()?
        }
        LocatorMode::Screenshots => {
            let locator = ImageLocator::from_settings(&settings);
            Driver::new(settings, desktop, locator).run()?
        }
    };

    Ok(summary)
}
