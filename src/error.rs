//! Error handling for the Papo Reto client
//!
//! Request-level failures are reported through [`crate::fetch::ApiResponse`];
//! this type covers everything around the requests: building the client,
//! loading configuration, session storage and token inspection.

use std::fmt;
use thiserror::Error;

/// Unified error type for the Papo Reto client
#[derive(Error, Debug)]
pub enum Error {
    /// Network or HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// JWT errors
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// File system errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or missing configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Session credential errors
    #[error("Session error: {0}")]
    Session(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config<T: fmt::Display>(msg: T) -> Self {
        Error::Config(msg.to_string())
    }

    /// Create a new session error
    pub fn session<T: fmt::Display>(msg: T) -> Self {
        Error::Session(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
