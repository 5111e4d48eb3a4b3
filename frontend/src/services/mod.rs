//! Browser services.
//!
//! # Services
//!
//! - [`upload`] - multipart upload to the form's action
//! - [`dialog`] - blocking user notices

pub mod dialog;
pub mod upload;

pub use dialog::*;
pub use upload::*;
