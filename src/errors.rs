use thiserror::Error;
use url::Url;

/// Mojang API error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("No data were received in the response from {url}")]
    NoContent { url: Url },

    #[error("The request to {url} was executed with a non-existent or expired access token")]
    Forbidden { url: Url },

    #[error("The request limit for {url} was exceeded")]
    TooManyRequests { url: Url },

    #[error("{0}")]
    Operation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Base64 decoding error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;
