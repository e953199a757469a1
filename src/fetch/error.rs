use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    // Connection refused, DNS, timeouts, body read failures
    #[error("Network request failed for {url}")]
    NetworkFailure {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP request failed for {url} with status {status}: {body}")]
    HttpError {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Response from {url} is not valid JSON")]
    InvalidJson {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid request URL '{0}'")]
    InvalidUrl(String, #[source] url::ParseError),
}
