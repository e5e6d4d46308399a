use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::automation::sequencer::DialStage;

/// Why a single dial attempt stopped early.
#[derive(Error, Debug)]
pub enum DialError {
    #[error("{0}")]
    Backend(String),

    #[error("Screenshot not found: {}", .0.display())]
    AssetMissing(PathBuf),

    #[error("Could not find {element} after {} seconds", .timeout.as_secs())]
    ElementNotFound { element: String, timeout: Duration },

    /// Wraps the failure of one sequencer stage; displays as the inner error.
    #[error("{source}")]
    Stage {
        stage: DialStage,
        #[source]
        source: Box<DialError>,
    },
}

impl DialError {
    /// The stage that failed, when the error came out of the sequencer.
    pub fn stage(&self) -> Option<DialStage> {
        match self {
            DialError::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// The underlying error with any stage wrapper removed.
    pub fn root(&self) -> &DialError {
        match self {
            DialError::Stage { source, .. } => source.root(),
            other => other,
        }
    }
}

#[derive(Error, Debug)]
pub enum InputError {
    #[error("CSV file {} not found", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed contacts file: {0}")]
    Csv(#[from] csv::Error),
}

/// Errors that end a whole run rather than a single number
#[derive(Error, Debug)]
pub enum RunError {
    #[error("desktop automation unavailable: {0}")]
    Desktop(#[from] DialError),

    #[error("failed to write dial log: {0}")]
    Log(#[from] std::io::Error),
}
