//! Error types for the Basecamp feed.

use thiserror::Error;

use crate::model::Event;

/// A single request to the Basecamp API failed.
#[derive(Error, Debug)]
pub enum FeedError {
    /// Transport failure (connect, TLS, body read).
    #[error("Basecamp request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Basecamp returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The response body was not the expected JSON.
    #[error("Failed to decode Basecamp response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Pagination stopped on a failing page.
///
/// `fetched` holds the events collected from the pages before `page`.
#[derive(Error, Debug)]
#[error("Fetching events page {page} failed after {} events: {source}", .fetched.len())]
pub struct FetchError {
    pub page: u32,
    pub fetched: Vec<Event>,
    #[source]
    pub source: FeedError,
}

pub type Result<T> = std::result::Result<T, FeedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FeedError::Status {
            status: reqwest::StatusCode::UNAUTHORIZED,
            body: "bad credentials".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Basecamp returned 401 Unauthorized: bad credentials"
        );

        let err = FetchError {
            page: 2,
            fetched: Vec::new(),
            source: err,
        };
        assert!(err.to_string().starts_with("Fetching events page 2 failed after 0 events"));
    }
}
