pub mod context;
pub mod detection;
pub mod interaction;
pub mod locator;
pub mod sequencer;

#[cfg(test)]
pub mod testing;

use std::fmt;

/// Phone Link controls the dial sequence clicks on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    PhoneTab,
    DialButton,
    CallButton,
    HangupButton,
}

impl Element {
    /// Name used for the reference screenshot (`<name>.png`)
    pub fn name(&self) -> &'static str {
        match self {
            Element::PhoneTab => "phone_tab",
            Element::DialButton => "dial_button",
            Element::CallButton => "call_button",
            Element::HangupButton => "hangup_button",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
