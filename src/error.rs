use std::fmt;
use thiserror::Error;

/// One abandoned candidate URL and why it was abandoned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptError {
    pub url: String,
    pub reason: AttemptFailure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptFailure {
    /// The request never produced a response.
    Transport(String),
    /// The server answered with a non-success status.
    Status(u16),
    /// The body was retrieved but yielded zero entries.
    NoEntries,
}

impl AttemptFailure {
    /// Whether the page itself was retrieved successfully.
    pub fn retrieved(&self) -> bool {
        matches!(self, AttemptFailure::NoEntries)
    }
}

impl fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptFailure::Transport(msg) => write!(f, "request failed: {}", msg),
            AttemptFailure::Status(code) => write!(f, "HTTP error {}", code),
            AttemptFailure::NoEntries => write!(f, "no entries parsed"),
        }
    }
}

impl fmt::Display for AttemptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.url, self.reason)
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid price list: {0:?}")]
    InvalidInput(String),

    #[error("exchange rate unavailable: {0}")]
    RateUnavailable(String),

    #[error("droplist request failed for {url}")]
    FetchFailed { url: String, attempts: Vec<AttemptError> },

    #[error("droplist data unavailable at {url}")]
    NoEntriesFound { url: String, attempts: Vec<AttemptError> },
}

impl Error {
    /// The single message shown to the user for this failure.
    pub fn status_message(&self) -> String {
        match self {
            Error::InvalidInput(_) => {
                "Enter item prices separated by commas (numbers only).".to_string()
            }
            Error::RateUnavailable(_) => {
                "Could not update rates right now. Please try again.".to_string()
            }
            Error::FetchFailed { .. } | Error::NoEntriesFound { .. } => {
                format!("Could not load droplist data right now. {}", self)
            }
        }
    }

    /// Per-candidate failures collected while fetching a snapshot.
    pub fn attempts(&self) -> &[AttemptError] {
        match self {
            Error::FetchFailed { attempts, .. } | Error::NoEntriesFound { attempts, .. } => attempts,
            _ => &[],
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
