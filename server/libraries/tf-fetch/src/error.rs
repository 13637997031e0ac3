//
// Copyright 2025 Tabs Data Inc.
//

use tf_error::tf_error;
use tf_tableframe::dataset::TabularDataset;
use tf_tableframe::decode::TabularFormat;
use tf_tableframe::error::DecodeError;

/// Outcome of fetching a remote table.
pub type FetchResult = Result<TabularDataset, FetchError>;

/// Coarse classification of a fetch failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum FetchErrorKind {
    /// The request never got a response: bad URL, DNS, refused connection, timeout.
    Network,
    /// The server answered with a non-success status.
    HttpStatus,
    /// The body could not be decoded in the format inferred from the URL.
    Decode,
}

#[tf_error]
#[derive(Clone, PartialEq)]
pub enum FetchError {
    #[error("Invalid URL '{0}': {1}")]
    InvalidUrl(String, String) = 0,
    #[error("Could not decode '{0}' as {1}: {2}")]
    Decode(String, TabularFormat, #[source] DecodeError) = 1,
    #[error("Request to '{0}' failed with HTTP status {1}")]
    HttpStatus(String, u16) = 2000,
    #[error("Request to '{0}' failed: {1}")]
    Network(String, String) = 3000,
    #[error("Could not create HTTP client: {0}")]
    Client(String) = 5000,
    #[error("Decoding '{0}' did not complete: {1}")]
    DecodeTaskFailed(String, String) = 5001,
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::InvalidUrl(..) | FetchError::Network(..) | FetchError::Client(..) => {
                FetchErrorKind::Network
            }
            FetchError::HttpStatus(..) => FetchErrorKind::HttpStatus,
            FetchError::Decode(..) | FetchError::DecodeTaskFailed(..) => FetchErrorKind::Decode,
        }
    }
}
