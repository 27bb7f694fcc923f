use std::error::Error as StdError;

use thiserror::Error;

use crate::model::DisplayError;

/// Failures of a single provider call.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Provider answered with something other than 200.
    #[error("provider responded with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("malformed provider response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("provider response contained no weather conditions")]
    MissingCondition,
}

/// Every way a lookup can end without a reading. Display text is the user-facing message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Please enter a city name.")]
    EmptyCity,

    #[error("Could not find weather for '{city}'.")]
    NotFound { city: String, status: u16 },

    #[error("Error fetching weather: {0}")]
    Fetch(String),
}

impl LookupError {
    /// Classify a provider failure for the given (trimmed) city.
    pub fn from_provider(city: &str, err: ProviderError) -> Self {
        match err {
            ProviderError::Rejected { status, .. } => LookupError::NotFound {
                city: city.to_string(),
                status,
            },
            other => LookupError::Fetch(error_chain(&other)),
        }
    }
}

impl From<LookupError> for DisplayError {
    fn from(err: LookupError) -> Self {
        DisplayError::new(err.to_string())
    }
}

/// Render an error and its sources as `outer: inner: innermost`.
pub fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !text.is_empty() && !out.ends_with(&text) {
            out.push_str(": ");
            out.push_str(&text);
        }
        source = cause.source();
    }
    out
}
