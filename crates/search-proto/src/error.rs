use thiserror::Error;

/// Why a search request failed.
///
/// Callers treat every variant the same way (the search simply failed); the
/// distinction exists so the log says what went wrong.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search request could not be sent: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("search endpoint returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("search response could not be decoded: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for SearchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            SearchError::Decode(e.to_string())
        } else {
            SearchError::Transport(e)
        }
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(e: serde_json::Error) -> Self {
        SearchError::Decode(e.to_string())
    }
}
