//! UI Components for the PaperDrop upload page.
//!
//! - [`Hero`] - Card title and description
//! - [`UploadForm`] - Title, category and drag & drop document upload
//! - [`NotificationStack`] - Toast notifications

mod hero;
mod upload;
pub mod notification;

pub use hero::*;
pub use upload::*;
pub use notification::*;
