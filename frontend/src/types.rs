//! Common types used across the frontend application.
//!
//! # Categories
//!
//! - **Form Types** - user-entered fields and file handles
//! - **API Types** - upload endpoint response
//! - **Notice Types** - messages shown to the user
//! - **Error Types** - frontend error handling

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use wasm_bindgen::JsValue;

// =============================================================================
// Form Types
// =============================================================================

/// Values typed into the upload form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormFields {
    /// Paper title
    pub title: String,
    /// Selected category (e.g. `cs.AI`)
    pub category: String,
}

impl FormFields {
    pub fn clear(&mut self) {
        self.title.clear();
        self.category.clear();
    }
}

/// A file chosen by the user.
///
/// Implemented for [`web_sys::File`]; tests use a plain struct.
pub trait FileHandle: Clone + 'static {
    /// File name without path.
    fn file_name(&self) -> String;
    /// Size in bytes.
    fn byte_size(&self) -> u64;
}

impl FileHandle for web_sys::File {
    fn file_name(&self) -> String {
        self.name()
    }

    fn byte_size(&self) -> u64 {
        self.size() as u64
    }
}

// =============================================================================
// API Types
// =============================================================================

/// Structured reply of the upload endpoint to a script-initiated request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UploadOutcome {
    pub success: bool,
    /// Empty when absent or `null`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub message: String,
    /// Id of the stored paper, when the server reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paper_id: Option<u64>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// =============================================================================
// Notice Types
// =============================================================================

/// Visual flavour of a notice or toast.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    /// Font Awesome icon name (without the `fa-` prefix).
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationKind::Success => "check-circle",
            NotificationKind::Error => "exclamation-circle",
            NotificationKind::Warning => "exclamation-triangle",
            NotificationKind::Info => "info-circle",
        }
    }

    /// CSS modifier class.
    pub fn css_class(&self) -> &'static str {
        match self {
            NotificationKind::Info => "notification-info",
            NotificationKind::Success => "notification-success",
            NotificationKind::Warning => "notification-warning",
            NotificationKind::Error => "notification-error",
        }
    }
}

/// A message to present once a submission attempt resolves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub kind: NotificationKind,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self { message: message.into(), kind: NotificationKind::Success }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { message: message.into(), kind: NotificationKind::Error }
    }
}

// =============================================================================
// Error Types
// =============================================================================

/// A client-side precondition that failed before any request was sent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a paper title")]
    MissingTitle,
    #[error("Please select a category")]
    MissingCategory,
    #[error("Please select a file to upload")]
    MissingFile,
}

/// Frontend application errors.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum AppError {
    /// Form preconditions not met.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A submission for this form is still in flight.
    #[error("An upload is already in progress")]
    AlreadySubmitting,

    /// Request could not be sent or the connection failed.
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx status.
    #[error("Server error ({status}): {body}")]
    Server { status: u16, body: String },

    /// Body was not a structured upload result.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// A browser API call failed.
    #[error("Browser error: {0}")]
    Browser(String),
}

impl AppError {
    /// Converts a thrown JS value, preferring its `message` property.
    pub fn browser(value: JsValue) -> Self {
        let message = js_sys::Reflect::get(&value, &JsValue::from_str("message"))
            .ok()
            .and_then(|v| v.as_string())
            .or_else(|| value.as_string())
            .unwrap_or_else(|| format!("{:?}", value));
        AppError::Browser(message)
    }

    /// Description of a transport failure, embedded in the generic notice.
    pub fn cause(&self) -> String {
        match self {
            AppError::Network(msg) | AppError::Parse(msg) | AppError::Browser(msg) => msg.clone(),
            AppError::Server { status, .. } => format!("server responded with status {}", status),
            other => other.to_string(),
        }
    }
}

/// Result type alias for frontend operations.
pub type AppResult<T> = Result<T, AppError>;
