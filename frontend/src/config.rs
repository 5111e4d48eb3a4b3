//! Application configuration.
//!
//! Compile-time defaults for the PaperDrop upload form. The host page can
//! override most of them through `data-*` attributes on the mount element,
//! see [`AppConfig::from_document`].

use crate::session::UploadTarget;

/// Id of the element the application mounts into.
///
/// Falls back to `<body>` when the page has no such element.
pub const MOUNT_ELEMENT_ID: &str = "paper-upload";

/// Default upload endpoint, used when the mount element has no `data-upload-url`.
pub const DEFAULT_UPLOAD_URL: &str = "/papers/upload/";

/// Multipart field name carrying the selected document.
pub const DEFAULT_FILE_FIELD: &str = "document";

/// Default `accept` filter for the file picker.
pub const DEFAULT_ACCEPT: &str = ".pdf,.doc,.docx";

/// Categories offered when the host page does not provide its own list.
pub const DEFAULT_CATEGORIES: &[&str] = &["cs.AI", "cs.CL", "cs.CV", "cs.LG", "stat.ML"];

/// Header marking a request as script-initiated.
pub const REQUESTED_WITH_HEADER: &str = "X-Requested-With";
pub const REQUESTED_WITH_VALUE: &str = "XMLHttpRequest";

/// Cookie holding the CSRF token, and the header it is echoed in.
pub const CSRF_COOKIE_NAME: &str = "csrftoken";
pub const CSRF_HEADER: &str = "X-CSRFToken";

// =============================================================================
// Labels
// =============================================================================

pub const ZONE_PLACEHOLDER_HEADING: &str = "Drag & Drop your paper here";
pub const ZONE_PLACEHOLDER_DETAIL: &str = "or click to browse files";
pub const ZONE_SELECTED_HEADING: &str = "Selected file:";
pub const ZONE_PLACEHOLDER_ICON: &str = "fas fa-cloud-upload-alt fa-3x text-glass-muted mb-3";
pub const ZONE_SELECTED_ICON: &str = "fas fa-file-alt fa-3x text-glass-muted mb-3";

pub const SUBMIT_LABEL: &str = "Upload Paper";
pub const SUBMITTING_LABEL: &str = "Uploading...";
pub const DEFAULT_LOADING_LABEL: &str = "Loading...";

/// Shown when the server rejects an upload without saying why.
pub const UPLOAD_FAILED_FALLBACK: &str = "An error occurred while uploading the file";

// =============================================================================
// Timings
// =============================================================================

/// How long a toast stays on screen (ms).
pub const NOTIFICATION_DURATION_MS: u32 = 3000;

/// Fade-out length before a toast is removed (ms).
pub const NOTIFICATION_FADE_MS: u32 = 300;

/// How long a blank required input stays highlighted (ms).
pub const INVALID_HIGHLIGHT_MS: u32 = 3000;

/// Ripple span lifetime on glass buttons (ms).
pub const RIPPLE_DURATION_MS: u32 = 600;

// =============================================================================
// Runtime configuration
// =============================================================================

/// How outcome and validation messages are presented.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NoticeStyle {
    /// Blocking `window.alert`.
    #[default]
    Alert,
    /// Non-blocking toast from the notification stack.
    Toast,
}

impl NoticeStyle {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "alert" => Some(NoticeStyle::Alert),
            "toast" => Some(NoticeStyle::Toast),
            _ => None,
        }
    }
}

/// Upload form configuration resolved at start-up.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    /// Form action the upload is POSTed to.
    pub upload_url: String,
    /// Multipart field name for the document.
    pub file_field: String,
    /// File picker `accept` filter.
    pub accept: String,
    /// Options of the category select.
    pub categories: Vec<String>,
    /// Alert or toast.
    pub notice_style: NoticeStyle,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            upload_url: DEFAULT_UPLOAD_URL.to_string(),
            file_field: DEFAULT_FILE_FIELD.to_string(),
            accept: DEFAULT_ACCEPT.to_string(),
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            notice_style: NoticeStyle::Alert,
        }
    }
}

impl AppConfig {
    /// Builds a configuration from attribute lookups.
    ///
    /// `lookup` receives attribute names such as `data-upload-url`. Missing or
    /// blank values keep the default.
    pub fn from_attributes(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let value = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(url) = value("data-upload-url") {
            config.upload_url = url;
        }
        if let Some(field) = value("data-file-field") {
            config.file_field = field;
        }
        if let Some(accept) = value("data-accept") {
            config.accept = accept;
        }
        if let Some(raw) = value("data-categories") {
            let categories: Vec<String> = raw
                .split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .collect();
            if !categories.is_empty() {
                config.categories = categories;
            }
        }
        if let Some(style) = value("data-notice").as_deref().and_then(NoticeStyle::parse) {
            config.notice_style = style;
        }

        config
    }

    /// Reads overrides from the mount element (or `<body>`).
    pub fn from_document() -> Self {
        let document = gloo_utils::document();
        let host = document
            .get_element_by_id(MOUNT_ELEMENT_ID)
            .or_else(|| document.body().map(Into::into));

        match host {
            Some(element) => Self::from_attributes(|name| element.get_attribute(name)),
            None => Self::default(),
        }
    }

    /// Destination for one submission attempt.
    pub fn upload_target(&self, csrf_token: Option<String>) -> UploadTarget {
        UploadTarget {
            action: self.upload_url.clone(),
            file_field: self.file_field.clone(),
            csrf_token,
        }
    }
}
