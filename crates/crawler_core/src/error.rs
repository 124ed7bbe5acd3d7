use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Why a single page fetch failed. Never fatal to the crawl as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FetchErrorKind {
    InvalidUrl,
    NotFound,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Transport,
}

impl fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchErrorKind::InvalidUrl => write!(f, "invalid url"),
            FetchErrorKind::NotFound => write!(f, "not found"),
            FetchErrorKind::HttpStatus(code) => write!(f, "http status {code}"),
            FetchErrorKind::Timeout => write!(f, "timeout"),
            FetchErrorKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FetchErrorKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FetchErrorKind::Transport => write!(f, "transport error"),
        }
    }
}

/// A failed fetch of one URL, with a structured kind and a human message.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FetchErrorKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FetchErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}
