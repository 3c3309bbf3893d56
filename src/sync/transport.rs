//! The HTTP capability the sync engine runs on.
//!
//! Everything the engine needs from the network goes through
//! [`Transport::send`]: one request in, status and body text out. Whether
//! a non-2xx status is an error is decided by the caller, because
//! existence probes need to read the body of "not found" answers.

use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
            Method::Put => write!(f, "PUT"),
            Method::Delete => write!(f, "DELETE"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Json(Value),
    /// Raw payload with an explicit content type (style definitions).
    Raw {
        content_type: String,
        content: String,
    },
}

/// A request addressed relative to the server's base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub body: Option<Body>,
}

impl Request {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            body: Some(Body::Json(body)),
        }
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Put,
            path: path.into(),
            body: Some(Body::Json(body)),
        }
    }

    pub fn put_raw(
        path: impl Into<String>,
        content_type: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            method: Method::Put,
            path: path.into(),
            body: Some(Body::Raw {
                content_type: content_type.into(),
                content: content.into(),
            }),
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            path: path.into(),
            body: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turns a non-2xx response into [`TransportError::Status`].
    pub fn error_for_status(self) -> Result<Self, TransportError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(TransportError::Status {
                status: self.status,
                body: self.body,
            })
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("server returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("connection error: {0}")]
    Connection(String),
    #[error("invalid server url '{0}'")]
    InvalidUrl(String),
}

/// Authenticated request/response capability.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Sends `request` and returns the response whatever its status. Only
    /// failures to get a response at all are errors.
    async fn send(&self, request: Request) -> Result<Response, TransportError>;
}
