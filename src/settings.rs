use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Absolute screen position in pixels.
pub type ScreenPoint = (u32, u32);

/// Which way the dial sequencer finds the buttons it clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocatorMode {
    /// Fixed coordinates calibrated for a 1920x1080 screen
    Coordinates,
    /// Reference screenshots matched on screen
    Screenshots,
}

impl LocatorMode {
    pub fn banner(&self) -> &'static str {
        match self {
            LocatorMode::Coordinates => "Phone Link Dial Automation (Coordinate-Based)",
            LocatorMode::Screenshots => "Phone Link Dial Automation (Screenshot-Based)",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DialerSettings {
    #[serde(default = "default_input_path")]
    pub input_path: PathBuf,

    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,

    #[serde(default = "default_screenshot_dir")]
    pub screenshot_dir: PathBuf,

    #[serde(default)]
    pub coordinates: ElementCoordinates,

    #[serde(default)]
    pub delays: StageDelays,

    #[serde(default)]
    pub matching: MatchSettings,

    // Key that resolves the typed digits to a dialable contact
    #[serde(default = "default_confirm_key")]
    pub confirm_key: String,
}

impl Default for DialerSettings {
    fn default() -> Self {
        Self {
            input_path: default_input_path(),
            log_path: default_log_path(),
            screenshot_dir: default_screenshot_dir(),
            coordinates: ElementCoordinates::default(),
            delays: StageDelays::default(),
            matching: MatchSettings::default(),
            confirm_key: default_confirm_key(),
        }
    }
}

fn default_input_path() -> PathBuf {
    PathBuf::from("contacts.csv")
}

fn default_log_path() -> PathBuf {
    PathBuf::from("logs/dial_log.txt")
}

fn default_screenshot_dir() -> PathBuf {
    PathBuf::from("screenshots")
}

fn default_confirm_key() -> String {
    "return".to_string()
}

/// Click targets for the coordinate-based variant
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ElementCoordinates {
    pub phone_tab: ScreenPoint,
    pub dial_button: ScreenPoint,
    pub call_button: ScreenPoint,
    pub hangup_button: ScreenPoint,
}

impl Default for ElementCoordinates {
    fn default() -> Self {
        Self {
            phone_tab: (360, 63),
            dial_button: (763, 152),
            call_button: (763, 719),
            hangup_button: (871, 826),
        }
    }
}

/// Fixed waits between UI actions, in milliseconds.
///
/// These stand in for real readiness signals from Phone Link, so a slow
/// machine may still outrun them.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct StageDelays {
    pub after_phone_tab_ms: u64,
    pub after_dial_pad_ms: u64,
    pub after_select_all_ms: u64,
    pub typing_interval_ms: u64,
    pub after_typing_ms: u64,
    pub after_confirm_ms: u64,
    /// How long the call is held before hanging up
    pub call_hold_ms: u64,
    pub hangup_settle: HangupSettle,
    pub inter_call_ms: u64,
    pub startup_grace_ms: u64,
}

impl Default for StageDelays {
    fn default() -> Self {
        Self {
            after_phone_tab_ms: 2000,
            after_dial_pad_ms: 1000,
            after_select_all_ms: 500,
            typing_interval_ms: 50,
            after_typing_ms: 1000,
            after_confirm_ms: 2000,
            call_hold_ms: 3000,
            hangup_settle: HangupSettle::default(),
            inter_call_ms: 5000,
            startup_grace_ms: 5000,
        }
    }
}

/// Wait after the hang-up click. The two variants have always disagreed
/// here, so each keeps its own value.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct HangupSettle {
    pub coordinates_ms: u64,
    pub screenshots_ms: u64,
}

impl Default for HangupSettle {
    fn default() -> Self {
        Self {
            coordinates_ms: 1000,
            screenshots_ms: 3000,
        }
    }
}

impl StageDelays {
    pub fn hangup_settle(&self, mode: LocatorMode) -> Duration {
        let ms = match mode {
            LocatorMode::Coordinates => self.hangup_settle.coordinates_ms,
            LocatorMode::Screenshots => self.hangup_settle.screenshots_ms,
        };
        Duration::from_millis(ms)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct MatchSettings {
    pub confidence: f32, // Minimum match score (0.0-1.0)
    pub timeout_ms: u64,
    pub poll_interval_ms: u64,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            confidence: 0.8,
            timeout_ms: 10_000,
            poll_interval_ms: 1000,
        }
    }
}

impl DialerSettings {
    const SETTINGS_FILE: &'static str = "dialer_settings.json";

    /// Load settings from file, or fall back to the built-in defaults
    pub fn load() -> Self {
        Self::load_from(Path::new(Self::SETTINGS_FILE))
    }

    fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<DialerSettings>(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!(file = %path.display(), error = %e, "ignoring unreadable settings");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_calibrated_layout() {
        let settings = DialerSettings::default();
        assert_eq!(settings.input_path, PathBuf::from("contacts.csv"));
        assert_eq!(settings.log_path, PathBuf::from("logs/dial_log.txt"));
        assert_eq!(settings.coordinates.call_button, (763, 719));
        assert_eq!(settings.matching.confidence, 0.8);
        assert_eq!(settings.matching.timeout_ms, 10_000);
    }

    #[test]
    fn test_hangup_settle_per_mode() {
        let delays = StageDelays::default();
        assert_eq!(delays.hangup_settle(LocatorMode::Coordinates), Duration::from_secs(1));
        assert_eq!(delays.hangup_settle(LocatorMode::Screenshots), Duration::from_secs(3));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings: DialerSettings =
            serde_json::from_str(r#"{ "input_path": "numbers.csv" }"#).unwrap();
        assert_eq!(settings.input_path, PathBuf::from("numbers.csv"));
        assert_eq!(settings.screenshot_dir, PathBuf::from("screenshots"));
        assert_eq!(settings.delays, StageDelays::default());
    }

    #[test]
    fn test_load_from_file_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dialer_settings.json");
        fs::write(&path, r#"{ "matching": { "timeout_ms": 3000 }, "confirm_key": "enter" }"#).unwrap();

        let settings = DialerSettings::load_from(&path);
        assert_eq!(settings.matching.timeout_ms, 3000);
        assert_eq!(settings.matching.confidence, 0.8);
        assert_eq!(settings.confirm_key, "enter");
    }

    #[test]
    fn test_load_from_unparsable_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dialer_settings.json");
        fs::write(&path, "{ not json").unwrap();

        let settings = DialerSettings::load_from(&path);
        assert_eq!(settings.input_path, PathBuf::from("contacts.csv"));
        assert_eq!(settings.coordinates, ElementCoordinates::default());
    }

    #[test]
    fn test_load_from_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = DialerSettings::load_from(&dir.path().join("absent.json"));
        assert_eq!(settings.delays, StageDelays::default());
        assert_eq!(settings.log_path, PathBuf::from("logs/dial_log.txt"));
    }
}
