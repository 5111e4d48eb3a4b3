//! PaperDrop - Frontend Rust/Leptos Application
//!
//! A WebAssembly upload form for research papers: drag & drop or browse for
//! a document, fill in title and category, and submit it in a single
//! script-initiated request. A small set of glass effects and form helpers
//! is made available to the host page as well.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  App                                                         │
//! │  ├── Hero (title, description)                               │
//! │  ├── UploadForm ──▶ UploadSession ──▶ HttpUploader (POST)    │
//! │  └── NotificationStack (toasts)                              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  effects / password / loading (page-wide, set on window)     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`session`] - Upload state machine driving all upload UI
//! - [`types`] - Common types (FormFields, UploadOutcome, AppError, etc.)
//! - [`components`] - UI components
//! - [`services`] - HTTP upload and browser dialogs
//! - [`loading`], [`password`], [`effects`] - Cosmetic helpers
//! - [`bindings`] - Helpers defined on `window` for inline handlers

use leptos::*;
use wasm_bindgen::JsCast;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod types;
pub mod session;
pub mod components;
pub mod services;
pub mod loading;
pub mod password;
pub mod effects;
pub mod bindings;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::{AppConfig, NoticeStyle};

// Types
pub use types::{
    // Form
    FileHandle, FormFields,
    // API
    UploadOutcome,
    // Notices
    Notice, NotificationKind,
    // Errors
    AppError, AppResult, ValidationError,
};

// Session
pub use session::{DropZoneView, SubmissionState, UploadRequest, UploadSession, UploadTarget};

// Components
pub use components::*;

// Services
pub use services::*;

// =============================================================================
// Application Entry Point
// =============================================================================

/// Boots the application: logging, mount, then page effects.
pub fn start() {
    // Setup panic hook for better error messages
    console_error_panic_hook::set_once();

    // Setup console logging
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("📄 PaperDrop - Starting Leptos App");

    let config = AppConfig::from_document();
    log::debug!("Upload target: {} (field \"{}\")", config.upload_url, config.file_field);

    let host = gloo_utils::document()
        .get_element_by_id(config::MOUNT_ELEMENT_ID)
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok());

    match host {
        Some(host) => mount_to(host, move || view! { <App config=config/> }),
        None => mount_to_body(move || view! { <App config=config/> }),
    }

    effects::init_glassmorphism();
    bindings::install_page_helpers();
}

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let notifications = provide_notifications();

    view! {
        <div class="content-area">
            <Hero/>
            <UploadForm config=config/>
        </div>
        <NotificationStack notifications=notifications/>
    }
}
