use std::time::Duration;

use thiserror::Error;

pub type RequestResult<T> = Result<T, RequestError>;

/**
    A non-successful HTTP response from a provider.
*/
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{status} - {body}")]
pub struct ResponseError {
    pub status: u16,
    pub body: String,
}

impl ResponseError {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    #[must_use]
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status >= 500
    }
}

/**
    Errors that can happen while talking to a provider.

    Every variant is cheap to clone, since a single outcome may
    be handed to many callers that joined the same request.
*/
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("network error: {0}")]
    Network(String),
    #[error("response error: {0}")]
    Response(#[from] ResponseError),
    #[error("failed to decode response: {0}")]
    Decode(String),
    #[error("request was cancelled")]
    Cancelled,
}

impl RequestError {
    /**
        Returns `true` for failures that may go away if the same
        request is sent again - timeouts, connection failures,
        and server-side (5xx) responses.
    */
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout(_) | Self::Network(_) => true,
            Self::Response(e) => e.is_server_error(),
            Self::InvalidInput(_) | Self::Decode(_) | Self::Cancelled => false,
        }
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl From<serde_json::Error> for RequestError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value.to_string())
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() {
            // reqwest does not tell us which limit was hit
            Self::Timeout(Duration::ZERO)
        } else if value.is_decode() {
            Self::Decode(value.to_string())
        } else {
            Self::Network(value.to_string())
        }
    }
}
