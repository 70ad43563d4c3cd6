//! Configuration types.
//!
//! Both handlers read plain environment variables; every value has a default
//! so a bare deployment still runs.

use crate::error::ConfigError;

pub const DEFAULT_SENDER: &str = "sender@example.com";
pub const DEFAULT_RECIPIENT: &str = "approver@example.com";
pub const DEFAULT_REPLY_ADDRESS: &str = "decisions@example.com";
pub const DEFAULT_SUBJECT: &str = "Your Decision Required: Accept or Reject";

/// Bytes of the raw reply logged before parsing.
pub const DEFAULT_PREVIEW_BYTES: usize = 500;

/// Notifier configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifierConfig {
    /// Verified sending identity.
    pub sender: String,
    /// Who receives the Accept/Reject links.
    pub recipient: String,
    /// Monitored mailbox the links reply to.
    pub reply_address: String,
    /// Subject of the decision request.
    pub subject: String,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            sender: DEFAULT_SENDER.to_string(),
            recipient: DEFAULT_RECIPIENT.to_string(),
            reply_address: DEFAULT_REPLY_ADDRESS.to_string(),
            subject: DEFAULT_SUBJECT.to_string(),
        }
    }
}

impl NotifierConfig {
    /// Build config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str, default: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            sender: get("DECISION_SENDER", DEFAULT_SENDER),
            recipient: get("DECISION_RECIPIENT", DEFAULT_RECIPIENT),
            reply_address: get("DECISION_REPLY_ADDRESS", DEFAULT_REPLY_ADDRESS),
            subject: get("DECISION_SUBJECT", DEFAULT_SUBJECT),
        }
    }
}

/// Reply classifier configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyConfig {
    /// How many raw bytes of each fetched reply to log.
    pub preview_bytes: usize,
}

impl Default for ReplyConfig {
    fn default() -> Self {
        Self {
            preview_bytes: DEFAULT_PREVIEW_BYTES,
        }
    }
}

impl ReplyConfig {
    /// Build config from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw = lookup("REPLY_PREVIEW_BYTES")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let preview_bytes = match raw {
            Some(raw) => raw
                .parse::<usize>()
                .map_err(|e| ConfigError::InvalidValue {
                    key: "REPLY_PREVIEW_BYTES".into(),
                    message: format!("{raw:?}: {e}"),
                })?,
            None => DEFAULT_PREVIEW_BYTES,
        };

        Ok(Self { preview_bytes })
    }
}
