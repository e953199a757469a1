use crate::fetch::error::FetchError;
use crate::normalize::error::NormalizeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EcoVisionError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),
}

/// Coarse classification of an [`EcoVisionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request never produced a response (offline, refused, timed out).
    NetworkFailure,
    /// The backend answered with a non-2xx status.
    HttpError,
    /// The response was not JSON, or lacked the data this mode needs.
    MalformedResponse,
    /// The client itself could not be set up.
    Configuration,
}

impl EcoVisionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EcoVisionError::Fetch(FetchError::NetworkFailure { .. }) => ErrorKind::NetworkFailure,
            EcoVisionError::Fetch(FetchError::HttpError { .. }) => ErrorKind::HttpError,
            EcoVisionError::Fetch(FetchError::InvalidJson { .. }) => ErrorKind::MalformedResponse,
            EcoVisionError::Normalize(_) => ErrorKind::MalformedResponse,
            EcoVisionError::Fetch(FetchError::InvalidUrl(..)) | EcoVisionError::ClientBuild(_) => {
                ErrorKind::Configuration
            }
        }
    }
}
