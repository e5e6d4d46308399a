use std::io;
use std::time::Duration;

use crate::automation::interaction::Desktop;
use crate::automation::locator::Locator;
use crate::automation::sequencer::DialSequencer;
use crate::core::contacts::{ContactReader, ContactRow};
use crate::core::dial_log::{DialLog, DialStatus, NO_NUMBER};
use crate::error::InputError;
use crate::settings::DialerSettings;

/// Counts for one pass over the contacts file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub dialed: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub invalid: usize,
}

/// Walks the contacts file and dials each valid number in turn.
pub struct Driver<D: Desktop, L: Locator> {
    settings: DialerSettings,
    log: DialLog,
    sequencer: DialSequencer<D, L>,
}

impl<D: Desktop, L: Locator> Driver<D, L> {
    pub fn new(settings: DialerSettings, desktop: D, locator: L) -> Self {
        let log = DialLog::new(settings.log_path.clone());
        let sequencer = DialSequencer::new(desktop, locator, &settings);
        Self {
            settings,
            log,
            sequencer,
        }
    }

    pub fn sequencer(&self) -> &DialSequencer<D, L> {
        &self.sequencer
    }

    /// Dial every number in the contacts file.
    ///
    /// Per-number failures are logged and skipped. Only a failed log write
    /// ends the run with an error; a missing contacts file ends it normally.
    pub fn run(&mut self) -> io::Result<RunSummary> {
        let grace = Duration::from_millis(self.settings.delays.startup_grace_ms);
        println!("{}", self.sequencer.mode().banner());
        println!("Starting in {} seconds...", grace.as_secs());
        self.sequencer.desktop_mut().sleep(grace);

        let mut summary = RunSummary::default();

        let contacts = match ContactReader::open(&self.settings.input_path) {
            Ok(reader) => reader,
            Err(e) => {
                self.report_input_error(&e)?;
                return Ok(summary);
            }
        };

        let inter_call = Duration::from_millis(self.settings.delays.inter_call_ms);
        for row in contacts {
            match row {
                Ok(ContactRow::Invalid(number)) => {
                    self.log.record(DialStatus::Failed, &number, "(Invalid number)")?;
                    println!("Invalid number skipped: {}", number);
                    summary.invalid += 1;
                }
                Ok(ContactRow::Valid(number)) => {
                    println!("Preparing to dial: {}", number);
                    if self.dial_one(&number)? {
                        summary.succeeded += 1;
                    } else {
                        summary.failed += 1;
                    }
                    summary.dialed += 1;
                    // Let Phone Link settle before the next call
                    self.sequencer.desktop_mut().sleep(inter_call);
                }
                Err(e) => {
                    self.report_input_error(&e)?;
                    break;
                }
            }
        }

        tracing::info!(
            dialed = summary.dialed,
            succeeded = summary.succeeded,
            failed = summary.failed,
            invalid = summary.invalid,
            "run finished"
        );
        Ok(summary)
    }

    fn dial_one(&mut self, number: &str) -> io::Result<bool> {
        match self.sequencer.dial(number) {
            Ok(()) => {
                self.log.record(DialStatus::Success, number, "")?;
                println!("Called {} successfully", number);
                Ok(true)
            }
            Err(e) => {
                let message = e.to_string();
                tracing::debug!(number, stage = ?e.stage(), error = %message, "dial failed");
                self.log.record(DialStatus::Failed, number, &message)?;
                println!("Failed to call {}: {}", number, message);
                Ok(false)
            }
        }
    }

    fn report_input_error(&self, error: &InputError) -> io::Result<()> {
        match error {
            InputError::NotFound(path) => println!(
                "Error: {} not found. Please create the file with phone numbers.",
                path.display()
            ),
            other => println!("Error: {}", other),
        }
        self.log.record(DialStatus::Error, NO_NUMBER, &error.to_string())
    }
}
