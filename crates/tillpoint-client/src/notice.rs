//! Transient success / error messages shown after a user action.

use std::fmt;
use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A message with an expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    expires_at: Instant,
}

impl Notice {
    pub fn success(message: impl Into<String>, ttl: Duration) -> Self {
        Self::new(NoticeLevel::Success, message, ttl)
    }

    pub fn error(message: impl Into<String>, ttl: Duration) -> Self {
        Self::new(NoticeLevel::Error, message, ttl)
    }

    fn new(level: NoticeLevel, message: impl Into<String>, ttl: Duration) -> Self {
        Notice {
            level,
            message: message.into(),
            expires_at: Instant::now() + ttl,
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
