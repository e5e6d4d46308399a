use std::path::PathBuf;
use std::time::Duration;

use crate::automation::interaction::Desktop;
use crate::automation::Element;
use crate::error::DialError;
use crate::settings::{DialerSettings, ElementCoordinates, LocatorMode, ScreenPoint};

/// Finds where on screen an element should be clicked
pub trait Locator {
    fn mode(&self) -> LocatorMode;

    fn locate<D: Desktop + ?Sized>(
        &mut self,
        desktop: &mut D,
        element: Element,
    ) -> Result<ScreenPoint, DialError>;
}

/// Calibrated coordinates, no screen inspection
pub struct FixedLocator {
    coordinates: ElementCoordinates,
}

impl FixedLocator {
    pub fn new(coordinates: ElementCoordinates) -> Self {
        Self { coordinates }
    }
}

impl Locator for FixedLocator {
    fn mode(&self) -> LocatorMode {
        LocatorMode::Coordinates
    }

    fn locate<D: Desktop + ?Sized>(
        &mut self,
        _desktop: &mut D,
        element: Element,
    ) -> Result<ScreenPoint, DialError> {
        let point = match element {
            Element::PhoneTab => self.coordinates.phone_tab,
            Element::DialButton => self.coordinates.dial_button,
            Element::CallButton => self.coordinates.call_button,
            Element::HangupButton => self.coordinates.hangup_button,
        };
        Ok(point)
    }
}

/// Polls the screen for `<screenshot_dir>/<element>.png` until it shows up
/// or the timeout runs out.
pub struct ImageLocator {
    screenshot_dir: PathBuf,
    confidence: f32,
    timeout: Duration,
    poll_interval: Duration,
}

impl ImageLocator {
    pub fn new(
        screenshot_dir: impl Into<PathBuf>,
        confidence: f32,
        timeout: Duration,
        poll_interval: Duration,
    ) -> Self {
        Self {
            screenshot_dir: screenshot_dir.into(),
            confidence,
            timeout,
            poll_interval,
        }
    }

    pub fn from_settings(settings: &DialerSettings) -> Self {
        Self::new(
            settings.screenshot_dir.clone(),
            settings.matching.confidence,
            Duration::from_millis(settings.matching.timeout_ms),
            Duration::from_millis(settings.matching.poll_interval_ms),
        )
    }

    pub fn reference_image(&self, element: Element) -> PathBuf {
        self.screenshot_dir.join(format!("{}.png", element.name()))
    }
}

impl Locator for ImageLocator {
    fn mode(&self) -> LocatorMode {
        LocatorMode::Screenshots
    }

    fn locate<D: Desktop + ?Sized>(
        &mut self,
        desktop: &mut D,
        element: Element,
    ) -> Result<ScreenPoint, DialError> {
        let path = self.reference_image(element);
        if !path.exists() {
            return Err(DialError::AssetMissing(path));
        }

        let start = desktop.now();
        while desktop.now().duration_since(start) < self.timeout {
            match desktop.find_on_screen(&path, self.confidence) {
                Ok(Some(region)) => {
                    let center = region.center();
                    tracing::debug!(%element, x = center.0, y = center.1, score = region.score, "element found");
                    return Ok(center);
                }
                Ok(None) => {}
                // Screen grabs can fail transiently; keep polling until the timeout
                Err(e) => tracing::warn!(%element, error = %e, "Error finding element"),
            }
            desktop.sleep(self.poll_interval);
        }

        Err(DialError::ElementNotFound {
            element: element.name().to_string(),
            timeout: self.timeout,
        })
    }
}
