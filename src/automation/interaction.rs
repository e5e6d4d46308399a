use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use crate::automation::detection::MatchRegion;
use crate::error::DialError;
use crate::settings::ScreenPoint;

/// Delay for a specified number of milliseconds
pub fn delay_ms(ms: u64) {
    if ms > 0 {
        thread::sleep(Duration::from_millis(ms));
    }
}

/// Everything the dialer needs from the machine it drives: simulated input,
/// screen matching and the clock used to pace both.
pub trait Desktop {
    /// Left click at absolute screen coordinates
    fn click(&mut self, point: ScreenPoint) -> Result<(), DialError>;

    /// Ctrl+A in the focused field
    fn select_all(&mut self) -> Result<(), DialError>;

    fn type_char(&mut self, c: char) -> Result<(), DialError>;

    /// Press and release a named key (e.g. "return")
    fn press_key(&mut self, key: &str) -> Result<(), DialError>;

    /// Search the current screen for `template`, returning the best region
    /// scoring at least `confidence`
    fn find_on_screen(
        &mut self,
        template: &Path,
        confidence: f32,
    ) -> Result<Option<MatchRegion>, DialError>;

    fn sleep(&mut self, duration: Duration);

    fn now(&self) -> Instant;
}

/// Type `text` one character at a time with a fixed gap after each key
pub fn type_text<D: Desktop + ?Sized>(
    desktop: &mut D,
    text: &str,
    interval: Duration,
) -> Result<(), DialError> {
    for c in text.chars() {
        desktop.type_char(c)?;
        desktop.sleep(interval);
    }
    Ok(())
}
