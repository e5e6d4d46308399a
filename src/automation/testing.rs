//! In-memory desktop for tests: records every action and runs on a virtual clock.

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::automation::detection::MatchRegion;
use crate::automation::interaction::Desktop;
use crate::error::DialError;
use crate::settings::ScreenPoint;

#[derive(Debug, Clone, PartialEq)]
pub enum DesktopEvent {
    Click(ScreenPoint),
    SelectAll,
    Type(char),
    Key(String),
    Search(PathBuf),
    Sleep(Duration),
}

type SearchResult = Result<Option<MatchRegion>, String>;

/// Rejected clicks, keys and typing are not recorded in `events`; searches always are.
pub struct ScriptedDesktop {
    pub events: Vec<DesktopEvent>,
    pub failing_clicks: Vec<ScreenPoint>,
    pub fail_typing_after: Option<usize>,
    pub fail_keys: bool,
    searches: HashMap<PathBuf, VecDeque<SearchResult>>,
    start: Instant,
    elapsed: Duration,
}

impl ScriptedDesktop {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            failing_clicks: Vec::new(),
            fail_typing_after: None,
            fail_keys: false,
            searches: HashMap::new(),
            start: Instant::now(),
            elapsed: Duration::ZERO,
        }
    }

    /// Queue the outcome of the next search for `template`. Once the queue
    /// runs dry the template is reported as not on screen.
    pub fn script_search(&mut self, template: impl Into<PathBuf>, result: SearchResult) {
        self.searches.entry(template.into()).or_default().push_back(result);
    }

    pub fn clicks(&self) -> Vec<ScreenPoint> {
        self.events
            .iter()
            .filter_map(|e| match e {
                DesktopEvent::Click(p) => Some(*p),
                _ => None,
            })
            .collect()
    }

    pub fn typed(&self) -> String {
        self.events
            .iter()
            .filter_map(|e| match e {
                DesktopEvent::Type(c) => Some(*c),
                _ => None,
            })
            .collect()
    }

    pub fn searches(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, DesktopEvent::Search(_)))
            .count()
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

impl Desktop for ScriptedDesktop {
    fn click(&mut self, point: ScreenPoint) -> Result<(), DialError> {
        if self.failing_clicks.contains(&point) {
            return Err(DialError::Backend(format!("click at {:?} rejected", point)));
        }
        self.events.push(DesktopEvent::Click(point));
        Ok(())
    }

    fn select_all(&mut self) -> Result<(), DialError> {
        self.events.push(DesktopEvent::SelectAll);
        Ok(())
    }

    fn type_char(&mut self, c: char) -> Result<(), DialError> {
        if let Some(limit) = self.fail_typing_after {
            if self.typed().chars().count() >= limit {
                return Err(DialError::Backend("keyboard unavailable".to_string()));
            }
        }
        self.events.push(DesktopEvent::Type(c));
        Ok(())
    }

    fn press_key(&mut self, key: &str) -> Result<(), DialError> {
        if self.fail_keys {
            return Err(DialError::Backend(format!("key {} rejected", key)));
        }
        self.events.push(DesktopEvent::Key(key.to_string()));
        Ok(())
    }

    fn find_on_screen(
        &mut self,
        template: &Path,
        _confidence: f32,
    ) -> Result<Option<MatchRegion>, DialError> {
        self.events.push(DesktopEvent::Search(template.to_path_buf()));
        match self.searches.get_mut(template).and_then(|q| q.pop_front()) {
            Some(result) => result.map_err(DialError::Backend),
            None => Ok(None),
        }
    }

    fn sleep(&mut self, duration: Duration) {
        self.events.push(DesktopEvent::Sleep(duration));
        self.elapsed += duration;
    }

    fn now(&self) -> Instant {
        self.start + self.elapsed
    }
}
