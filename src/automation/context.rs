use rustautogui::{MatchMode, RustAutoGui};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::automation::detection::{best_match, MatchRegion};
use crate::automation::interaction::{delay_ms, Desktop};
use crate::error::DialError;
use crate::settings::ScreenPoint;

/// Real desktop driven through RustAutoGui
pub struct AutoGuiDesktop {
    gui: RustAutoGui,
    // Template path -> (alias, template size)
    templates: HashMap<PathBuf, (String, (u32, u32))>,
}

impl AutoGuiDesktop {
    pub fn new() -> Result<Self, DialError> {
        let gui = RustAutoGui::new(false)
            .map_err(|e| DialError::Backend(format!("Failed to initialize RustAutoGui: {}", e)))?;

        Ok(Self {
            gui,
            templates: HashMap::new(),
        })
    }

    /// Store a template once and reuse it for later searches
    fn template_alias(&mut self, path: &Path) -> Result<(String, (u32, u32)), DialError> {
        if let Some(entry) = self.templates.get(path) {
            return Ok(entry.clone());
        }

        let size = image::image_dimensions(path)
            .map_err(|e| DialError::Backend(format!("Failed to read '{}': {}", path.display(), e)))?;

        let alias = path.to_string_lossy().into_owned();
        self.gui
            .store_template_from_file(&alias, None, MatchMode::Segmented, &alias)
            .map_err(|e| DialError::Backend(format!("Failed to load template '{}': {}", alias, e)))?;

        tracing::debug!(template = %alias, width = size.0, height = size.1, "stored template");
        self.templates.insert(path.to_path_buf(), (alias.clone(), size));
        Ok((alias, size))
    }
}

impl Desktop for AutoGuiDesktop {
    fn click(&mut self, point: ScreenPoint) -> Result<(), DialError> {
        let (x, y) = point;
        self.gui
            .move_mouse_to_pos(x, y, 0.0)
            .map_err(|e| DialError::Backend(format!("Failed to move mouse to ({}, {}): {}", x, y, e)))?;

        // Short sleep to stabilize cursor
        delay_ms(20);

        self.gui
            .left_click()
            .map_err(|e| DialError::Backend(format!("Failed to click at ({}, {}): {}", x, y, e)))
    }

    fn select_all(&mut self) -> Result<(), DialError> {
        self.gui
            .keyboard_multi_key("ctrl", "a", None)
            .map_err(|e| DialError::Backend(format!("Failed to send ctrl+a: {}", e)))
    }

    fn type_char(&mut self, c: char) -> Result<(), DialError> {
        self.gui
            .keyboard_input(&c.to_string())
            .map_err(|e| DialError::Backend(format!("Failed to type '{}': {}", c, e)))
    }

    fn press_key(&mut self, key: &str) -> Result<(), DialError> {
        self.gui
            .keyboard_command(key)
            .map_err(|e| DialError::Backend(format!("Failed to press {}: {}", key, e)))
    }

    fn find_on_screen(
        &mut self,
        template: &Path,
        confidence: f32,
    ) -> Result<Option<MatchRegion>, DialError> {
        let (alias, size) = self.template_alias(template)?;

        let matches = self
            .gui
            .find_stored_image_on_screen(confidence, &alias)
            .map_err(|e| DialError::Backend(format!("Search for '{}' failed: {}", alias, e)))?;

        Ok(matches
            .and_then(|found| best_match(&found, confidence))
            .map(|(x, y, score)| MatchRegion::around((x, y), size, score)))
    }

    fn sleep(&mut self, duration: Duration) {
        delay_ms(duration.as_millis() as u64);
    }

    fn now(&self) -> Instant {
        Instant::now()
    }
}
