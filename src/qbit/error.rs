//! Error types for the qBittorrent API wrapper.

use thiserror::Error;

/// Errors from the qBittorrent Web API. Every variant is fatal for the
/// run; there is no retry path.
#[derive(Debug, Error)]
pub enum QbitError {
    /// The server rejected the login. Carries the server's response body.
    #[error("login to qBittorrent failed: {message}")]
    Auth {
        /// Response body returned instead of the `Ok.` success literal.
        message: String,
    },

    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error calling {url}: {source}")]
    Network {
        /// The endpoint that failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout calling {url}")]
    Timeout {
        /// The endpoint that timed out.
        url: String,
    },

    /// HTTP error response (4xx client errors, 5xx server errors).
    #[error("HTTP {status} calling {url}")]
    HttpStatus {
        /// The endpoint that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The response body could not be decoded as the expected JSON shape.
    #[error("invalid response from {url}: {source}")]
    Decode {
        /// The endpoint that returned the body.
        url: String,
        /// The underlying decode error.
        #[source]
        source: reqwest::Error,
    },
}

impl QbitError {
    /// Creates an authentication failure carrying the server's message.
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates a decode error.
    pub fn decode(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Decode {
            url: url.into(),
            source,
        }
    }
}

// No blanket `From<reqwest::Error>`: the variants need the endpoint URL
// for context, which the source error does not carry. Callers use the
// constructor helpers instead.
