//! Subject rules for classifying a decision reply.
//!
//! Literal, case-sensitive substring checks in a fixed order: the first
//! marker found wins, so a subject carrying both is `Accepted`.

use std::fmt;

use serde::Serialize;

pub const ACCEPTED_MARKER: &str = "Accepted";
pub const REJECTED_MARKER: &str = "Rejected";

/// Outcome derived from a reply's subject line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Classification {
    Accepted,
    Rejected,
    Unknown,
}

impl Classification {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Accepted => "Accepted",
            Self::Rejected => "Rejected",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a subject line.
pub fn classify_subject(subject: &str) -> Classification {
    if subject.contains(ACCEPTED_MARKER) {
        Classification::Accepted
    } else if subject.contains(REJECTED_MARKER) {
        Classification::Rejected
    } else {
        Classification::Unknown
    }
}
