use thiserror::Error;

/// Failures surfaced by the roster services.
///
/// Messages are kept as strings so the error can be cloned into the view
/// state and shown after the fact.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RosterError {
    /// Transport failure or a non-success HTTP status.
    #[error("request to {url} failed: {message}")]
    Network { url: String, message: String },

    /// Body was not JSON, or lacked the field we needed.
    #[error("unexpected response from {url}: {message}")]
    Parse { url: String, message: String },

    #[error("favorite storage failed: {0}")]
    Storage(String),

    #[error("no character named {0:?} in the current listing")]
    UnknownCharacter(String),
}

impl RosterError {
    pub fn network(url: &str, message: impl ToString) -> Self {
        Self::Network {
            url: url.to_string(),
            message: message.to_string(),
        }
    }

    pub fn parse(url: &str, message: impl ToString) -> Self {
        Self::Parse {
            url: url.to_string(),
            message: message.to_string(),
        }
    }
}

pub type Result<T, E = RosterError> = std::result::Result<T, E>;
