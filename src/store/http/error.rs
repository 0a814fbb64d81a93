//! API Error Classification
//!
//! Every failure of a REST call lands here first, classified by HTTP
//! status or transport phase, then crosses into `DomainError` at the
//! store boundary. Nothing is retried; errors surface to the caller.

use crate::domain::DomainError;

/// A failed REST call
#[derive(Debug, Clone)]
pub enum ApiError {
    /// The server answered with a non-success status. `message` carries
    /// the server-supplied detail when the body was `{"error": "..."}`.
    Status { status: u16, message: Option<String> },
    /// The request never completed (connect, DNS, timeout)
    Transport(String),
    /// The response body could not be decoded
    Decode(String),
}

impl ApiError {
    /// User-facing message for this failure
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status { status, message } => {
                let base = match status {
                    400 => "The request was invalid. Please check your input.",
                    401 => "You are not signed in. Please sign in and try again.",
                    403 => "You do not have permission to perform this action.",
                    404 => "The requested item could not be found. It may have been deleted.",
                    409 => "The item was changed by someone else. Please refresh and try again.",
                    422 => "The server rejected the request. Please check your input.",
                    500 => "The server encountered an error. Please try again later.",
                    503 => "The service is temporarily unavailable. Please try again later.",
                    _ => return match message {
                        Some(msg) => format!("Unexpected server response ({}): {}", status, msg),
                        None => format!("Unexpected server response ({}).", status),
                    },
                };
                match message {
                    Some(msg) => format!("{} ({})", base, msg),
                    None => base.to_string(),
                }
            }
            ApiError::Transport(_) => {
                "Could not reach the server. Please check your connection.".to_string()
            }
            ApiError::Decode(_) => {
                "Received an unreadable response from the server.".to_string()
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Status { status, message } => match message {
                Some(msg) => write!(f, "HTTP {}: {}", status, msg),
                None => write!(f, "HTTP {}", status),
            },
            ApiError::Transport(msg) => write!(f, "Transport error: {}", msg),
            ApiError::Decode(msg) => write!(f, "Decode error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ApiError::Status {
                status: status.as_u16(),
                message: None,
            }
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

impl From<ApiError> for DomainError {
    fn from(err: ApiError) -> Self {
        let message = err.user_message();
        match err {
            ApiError::Status { status, .. } => match status {
                400 | 422 => DomainError::InvalidInput(message),
                401 | 403 => DomainError::PermissionDenied(message),
                404 => DomainError::NotFound(message),
                409 => DomainError::Conflict(message),
                _ => DomainError::Internal(message),
            },
            ApiError::Transport(_) => DomainError::Network(message),
            ApiError::Decode(_) => DomainError::Internal(message),
        }
    }
}
