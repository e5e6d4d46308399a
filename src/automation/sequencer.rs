use std::fmt;
use std::time::Duration;

use crate::automation::interaction::{type_text, Desktop};
use crate::automation::locator::Locator;
use crate::automation::Element;
use crate::error::DialError;
use crate::settings::{DialerSettings, LocatorMode, StageDelays};

/// The six steps of one call, in the order they run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialStage {
    FocusPhoneTab,
    OpenDialPad,
    EnterNumber,
    ConfirmEntry,
    PlaceCall,
    HangUp,
}

impl DialStage {
    pub const ALL: [DialStage; 6] = [
        DialStage::FocusPhoneTab,
        DialStage::OpenDialPad,
        DialStage::EnterNumber,
        DialStage::ConfirmEntry,
        DialStage::PlaceCall,
        DialStage::HangUp,
    ];
}

impl fmt::Display for DialStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DialStage::FocusPhoneTab => "focus phone tab",
            DialStage::OpenDialPad => "open dial pad",
            DialStage::EnterNumber => "enter number",
            DialStage::ConfirmEntry => "confirm entry",
            DialStage::PlaceCall => "place call",
            DialStage::HangUp => "hang up",
        };
        f.write_str(s)
    }
}

/// Places and ends one call at a time against Phone Link.
pub struct DialSequencer<D: Desktop, L: Locator> {
    desktop: D,
    locator: L,
    delays: StageDelays,
    confirm_key: String,
}

impl<D: Desktop, L: Locator> DialSequencer<D, L> {
    pub fn new(desktop: D, locator: L, settings: &DialerSettings) -> Self {
        Self {
            desktop,
            locator,
            delays: settings.delays.clone(),
            confirm_key: settings.confirm_key.clone(),
        }
    }

    pub fn mode(&self) -> LocatorMode {
        self.locator.mode()
    }

    pub fn desktop(&self) -> &D {
        &self.desktop
    }

    pub fn desktop_mut(&mut self) -> &mut D {
        &mut self.desktop
    }

    /// Run all six stages for `number`. The first failing stage ends the
    /// attempt; later stages are not run.
    pub fn dial(&mut self, number: &str) -> Result<(), DialError> {
        for stage in DialStage::ALL {
            tracing::debug!(number, %stage, "dial stage");
            self.run_stage(stage, number)
                .map_err(|e| DialError::Stage {
                    stage,
                    source: Box::new(e),
                })?;
        }
        Ok(())
    }

    fn run_stage(&mut self, stage: DialStage, number: &str) -> Result<(), DialError> {
        match stage {
            DialStage::FocusPhoneTab => {
                self.click_element(Element::PhoneTab)?;
                self.pause(self.delays.after_phone_tab_ms);
            }
            DialStage::OpenDialPad => {
                self.click_element(Element::DialButton)?;
                self.pause(self.delays.after_dial_pad_ms);
            }
            DialStage::EnterNumber => {
                // Overwrite whatever is left in the field
                self.desktop.select_all()?;
                self.pause(self.delays.after_select_all_ms);
                type_text(
                    &mut self.desktop,
                    number,
                    Duration::from_millis(self.delays.typing_interval_ms),
                )?;
                self.pause(self.delays.after_typing_ms);
            }
            DialStage::ConfirmEntry => {
                self.desktop.press_key(&self.confirm_key)?;
                self.pause(self.delays.after_confirm_ms);
            }
            DialStage::PlaceCall => {
                self.click_element(Element::CallButton)?;
                self.pause(self.delays.call_hold_ms);
            }
            DialStage::HangUp => {
                self.click_element(Element::HangupButton)?;
                let settle = self.delays.hangup_settle(self.locator.mode());
                self.desktop.sleep(settle);
            }
        }
        Ok(())
    }

    fn click_element(&mut self, element: Element) -> Result<(), DialError> {
        let point = self.locator.locate(&mut self.desktop, element)?;
        self.desktop.click(point)
    }

    fn pause(&mut self, ms: u64) {
        self.desktop.sleep(Duration::from_millis(ms));
    }
}
