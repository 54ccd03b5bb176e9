use serde::{Deserialize, Serialize};

/// Transient user notification produced by a command (toast level).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, message: message.into() }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}

/// Result of one engine operation. `changed == false` means the lineup is untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub changed: bool,
    pub notice: Option<Notice>,
}

impl Outcome {
    pub fn applied(notice: Notice) -> Self {
        Self { changed: true, notice: Some(notice) }
    }

    pub fn applied_silently() -> Self {
        Self { changed: true, notice: None }
    }

    pub fn rejected(notice: Notice) -> Self {
        Self { changed: false, notice: Some(notice) }
    }

    pub fn unchanged() -> Self {
        Self { changed: false, notice: None }
    }
}
