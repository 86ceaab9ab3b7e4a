use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request middleware error: {0}")]
    Middleware(#[from] reqwest_middleware::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: token rejected")]
    Unauthorized,

    #[error("Rate limited, retry after {0:?}")]
    RateLimited(Option<Duration>),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("{method} returned ok=false: {error}")]
    Slack { method: String, error: String },

    #[error("Bad API response: {0}")]
    BadResponse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Missing credentials: {0} is not set")]
    MissingCredentials(&'static str),

    #[error(
        "Timed out after {waited:?} ({attempts} polls) waiting for {description}; last observed: {last_observed}"
    )]
    WaitTimeout {
        description: String,
        waited: Duration,
        attempts: u32,
        last_observed: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
