// Transient user-visible notices (the board's toast messages)
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Warning,
    Error,
}

/// Why a chart's load cycle produced a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NoticeKind {
    /// Envelope state was not `SUCCESS`.
    BadState,
    /// `SUCCESS` with null or empty data. The empty result is still used.
    EmptyPayload,
    /// Transport error, non-2xx status, undecodable body or timeout.
    NetworkFailure,
    /// Payload could not be mapped onto its chart shape.
    MalformedPayload,
}

impl NoticeKind {
    pub fn level(self) -> NoticeLevel {
        match self {
            NoticeKind::EmptyPayload => NoticeLevel::Warning,
            NoticeKind::BadState | NoticeKind::NetworkFailure | NoticeKind::MalformedPayload => {
                NoticeLevel::Error
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub kind: NoticeKind,
    pub level: NoticeLevel,
    /// Service name the notice is about.
    pub source: String,
    pub message: String,
    pub raised_at: DateTime<Utc>,
}

impl Notice {
    pub fn new(kind: NoticeKind, source: &str, message: impl Into<String>) -> Self {
        Self {
            kind,
            level: kind.level(),
            source: source.to_string(),
            message: message.into(),
            raised_at: Utc::now(),
        }
    }
}
