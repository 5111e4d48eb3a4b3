//! Upload session state machine.
//!
//! One [`UploadSession`] backs one upload form. It owns the selected file,
//! the typed fields and the submission state, and every piece of upload UI
//! (zone label, icon, submit button) is derived from it.
//!
//! ```text
//! Idle ──begin_submit──▶ Submitting ──finish(ok)──▶ Succeeded ──settle──▶ Idle (reset)
//!                                   └─finish(err)─▶ Failed    ──settle──▶ Idle (unchanged)
//! ```

use crate::config::{
    SUBMITTING_LABEL, SUBMIT_LABEL, UPLOAD_FAILED_FALLBACK, ZONE_PLACEHOLDER_DETAIL,
    ZONE_PLACEHOLDER_HEADING, ZONE_PLACEHOLDER_ICON, ZONE_SELECTED_HEADING, ZONE_SELECTED_ICON,
};
use crate::types::{AppError, AppResult, FileHandle, FormFields, Notice, UploadOutcome, ValidationError};

/// Where a submission attempt goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadTarget {
    /// Form action URL
    pub action: String,
    /// Multipart field name for the file
    pub file_field: String,
    /// CSRF token echoed in a header, if the page has one
    pub csrf_token: Option<String>,
}

/// Everything the transport needs for one POST.
#[derive(Clone, Debug, PartialEq)]
pub struct UploadRequest<F> {
    pub action: String,
    /// Text fields in form order
    pub fields: Vec<(String, String)>,
    pub file_field: String,
    pub file: F,
    pub csrf_token: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// Label, detail line and icon of the drop zone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DropZoneView {
    pub heading: String,
    pub detail: String,
    pub icon_class: &'static str,
}

impl DropZoneView {
    pub fn placeholder() -> Self {
        Self {
            heading: ZONE_PLACEHOLDER_HEADING.to_string(),
            detail: ZONE_PLACEHOLDER_DETAIL.to_string(),
            icon_class: ZONE_PLACEHOLDER_ICON,
        }
    }

    pub fn selected(file_name: impl Into<String>) -> Self {
        Self {
            heading: ZONE_SELECTED_HEADING.to_string(),
            detail: file_name.into(),
            icon_class: ZONE_SELECTED_ICON,
        }
    }
}

/// Transient state of one upload form.
#[derive(Clone, Debug, PartialEq)]
pub struct UploadSession<F> {
    selected_file: Option<F>,
    fields: FormFields,
    state: SubmissionState,
    drag_active: bool,
}

impl<F: FileHandle> Default for UploadSession<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FileHandle> UploadSession<F> {
    pub fn new() -> Self {
        Self {
            selected_file: None,
            fields: FormFields::default(),
            state: SubmissionState::Idle,
            drag_active: false,
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == SubmissionState::Submitting
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn selected_file(&self) -> Option<&F> {
        self.selected_file.as_ref()
    }

    pub fn is_drag_active(&self) -> bool {
        self.drag_active
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.fields.title = title.into();
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.fields.category = category.into();
    }

    // -------------------------------------------------------------------------
    // File selection
    // -------------------------------------------------------------------------

    /// Keeps the first file of `files`. Returns `false` for an empty list.
    pub fn select_file(&mut self, files: impl IntoIterator<Item = F>) -> bool {
        match files.into_iter().next() {
            Some(file) => {
                log::info!("📄 Selected file: {} ({} bytes)", file.file_name(), file.byte_size());
                self.selected_file = Some(file);
                true
            }
            None => false,
        }
    }

    pub fn drag_over(&mut self) {
        self.drag_active = true;
    }

    pub fn drag_leave(&mut self) {
        self.drag_active = false;
    }

    /// Drop onto the zone. Converges with [`select_file`](Self::select_file).
    pub fn drop_files(&mut self, files: impl IntoIterator<Item = F>) -> bool {
        self.drag_active = false;
        self.select_file(files)
    }

    // -------------------------------------------------------------------------
    // Derived UI
    // -------------------------------------------------------------------------

    pub fn zone_view(&self) -> DropZoneView {
        match &self.selected_file {
            Some(file) => DropZoneView::selected(file.file_name()),
            None => DropZoneView::placeholder(),
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_submitting() {
            SUBMITTING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    // -------------------------------------------------------------------------
    // Submission
    // -------------------------------------------------------------------------

    /// Checks title, category and file, in that order.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.fields.title.is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        if self.fields.category.is_empty() {
            return Err(ValidationError::MissingCategory);
        }
        if self.selected_file.is_none() {
            return Err(ValidationError::MissingFile);
        }
        Ok(())
    }

    /// Starts a submission attempt and hands back the request to send.
    ///
    /// On error the session is left exactly as it was.
    pub fn begin_submit(&mut self, target: &UploadTarget) -> AppResult<UploadRequest<F>> {
        if self.is_submitting() {
            return Err(AppError::AlreadySubmitting);
        }
        self.validate()?;

        let file = self
            .selected_file
            .clone()
            .ok_or(AppError::Validation(ValidationError::MissingFile))?;

        self.state = SubmissionState::Submitting;
        log::info!("📤 Uploading \"{}\" to {}", self.fields.title, target.action);

        Ok(UploadRequest {
            action: target.action.clone(),
            fields: vec![
                ("title".to_string(), self.fields.title.clone()),
                ("category".to_string(), self.fields.category.clone()),
            ],
            file_field: target.file_field.clone(),
            file,
            csrf_token: target.csrf_token.clone(),
        })
    }

    /// Applies the transport result of the in-flight attempt.
    ///
    /// Returns the notice to show, or `None` when nothing was in flight.
    pub fn finish(&mut self, result: AppResult<UploadOutcome>) -> Option<Notice> {
        if !self.is_submitting() {
            return None;
        }

        let notice = match result {
            Ok(outcome) if outcome.success => {
                log::info!("✅ Upload accepted: {}", outcome.message);
                self.state = SubmissionState::Succeeded;
                self.fields.clear();
                self.selected_file = None;
                self.drag_active = false;
                Notice::success(outcome.message)
            }
            Ok(outcome) => {
                log::warn!("⚠️ Upload rejected: {}", outcome.message);
                self.state = SubmissionState::Failed;
                if outcome.message.is_empty() {
                    Notice::error(UPLOAD_FAILED_FALLBACK)
                } else {
                    Notice::error(outcome.message)
                }
            }
            Err(e) => {
                log::error!("❌ Upload failed: {}", e);
                self.state = SubmissionState::Failed;
                Notice::error(format!("An error occurred: {}", e.cause()))
            }
        };

        Some(notice)
    }

    /// Returns to `Idle` once the outcome has been presented.
    pub fn settle(&mut self) {
        if matches!(self.state, SubmissionState::Succeeded | SubmissionState::Failed) {
            self.state = SubmissionState::Idle;
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    pub(crate) struct StubFile {
        pub name: String,
        pub bytes: Vec<u8>,
    }

    impl StubFile {
        pub fn new(name: &str) -> Self {
            Self { name: name.to_string(), bytes: b"%PDF-1.7".to_vec() }
        }
    }

    impl FileHandle for StubFile {
        fn file_name(&self) -> String {
            self.name.clone()
        }

        fn byte_size(&self) -> u64 {
            self.bytes.len() as u64
        }
    }

    pub(crate) fn target() -> UploadTarget {
        UploadTarget {
            action: "/papers/upload/".to_string(),
            file_field: "document".to_string(),
            csrf_token: None,
        }
    }

    pub(crate) fn filled_session() -> UploadSession<StubFile> {
        let mut session = UploadSession::new();
        session.set_title("Paper A");
        session.set_category("cs.AI");
        session.select_file(vec![StubFile::new("paper.pdf")]);
        session
    }

    #[test]
    fn test_initial_state() {
        let session = UploadSession::<StubFile>::new();
        assert_eq!(session.state(), SubmissionState::Idle);
        assert_eq!(session.zone_view(), DropZoneView::placeholder());
        assert_eq!(session.submit_label(), "Upload Paper");
        assert!(!session.is_drag_active());
    }

    #[test]
    fn test_select_first_file_only() {
        let mut session = UploadSession::new();
        assert!(session.select_file(vec![StubFile::new("a.pdf"), StubFile::new("b.pdf")]));
        let view = session.zone_view();
        assert_eq!(view.heading, "Selected file:");
        assert_eq!(view.detail, "a.pdf");
        assert_eq!(view.icon_class, "fas fa-file-alt fa-3x text-glass-muted mb-3");
    }

    #[test]
    fn test_empty_selection_is_ignored() {
        let mut session = UploadSession::new();
        session.select_file(vec![StubFile::new("a.pdf")]);
        assert!(!session.select_file(Vec::new()));
        assert_eq!(session.selected_file().map(|f| f.name.as_str()), Some("a.pdf"));
    }

    #[test]
    fn test_drop_converges_with_picker() {
        let files = vec![StubFile::new("paper.pdf"), StubFile::new("other.pdf")];

        let mut picked = UploadSession::new();
        picked.select_file(files.clone());

        let mut dropped = UploadSession::new();
        dropped.drag_over();
        assert!(dropped.is_drag_active());
        dropped.drop_files(files);

        assert!(!dropped.is_drag_active());
        assert_eq!(picked.zone_view(), dropped.zone_view());
        assert_eq!(picked, dropped);
    }

    #[test]
    fn test_drag_leave_clears_highlight() {
        let mut session = UploadSession::<StubFile>::new();
        session.drag_over();
        session.drag_leave();
        assert!(!session.is_drag_active());
    }

    #[test]
    fn test_validation_order() {
        let mut session = UploadSession::<StubFile>::new();
        assert_eq!(session.validate(), Err(ValidationError::MissingTitle));

        session.select_file(vec![StubFile::new("paper.pdf")]);
        session.set_category("cs.AI");
        assert_eq!(session.validate(), Err(ValidationError::MissingTitle));

        session.set_title("Paper A");
        session.set_category("");
        assert_eq!(session.validate(), Err(ValidationError::MissingCategory));

        let mut no_file = UploadSession::<StubFile>::new();
        no_file.set_title("Paper A");
        no_file.set_category("cs.AI");
        assert_eq!(no_file.validate(), Err(ValidationError::MissingFile));
    }

    #[test]
    fn test_failed_validation_keeps_idle() {
        let mut session = filled_session();
        session.set_title("");
        let before = session.clone();

        let err = session.begin_submit(&target()).unwrap_err();
        assert_eq!(err.to_string(), "Please enter a paper title");
        assert_eq!(session, before);
    }

    #[test]
    fn test_begin_submit_builds_request() {
        let mut session = filled_session();
        let mut target = target();
        target.csrf_token = Some("abc".to_string());

        let request = session.begin_submit(&target).unwrap();
        assert_eq!(session.state(), SubmissionState::Submitting);
        assert_eq!(session.submit_label(), "Uploading...");
        assert_eq!(request.action, "/papers/upload/");
        assert_eq!(
            request.fields,
            vec![
                ("title".to_string(), "Paper A".to_string()),
                ("category".to_string(), "cs.AI".to_string()),
            ]
        );
        assert_eq!(request.file_field, "document");
        assert_eq!(request.file.name, "paper.pdf");
        assert_eq!(request.csrf_token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_in_flight_guard() {
        let mut session = filled_session();
        session.begin_submit(&target()).unwrap();
        assert_eq!(session.begin_submit(&target()), Err(AppError::AlreadySubmitting));
        assert_eq!(session.state(), SubmissionState::Submitting);
    }

    #[test]
    fn test_success_resets_form() {
        let mut session = filled_session();
        session.begin_submit(&target()).unwrap();

        let notice = session
            .finish(Ok(UploadOutcome { success: true, message: "Uploaded".into(), paper_id: Some(7) }))
            .unwrap();

        assert_eq!(notice, Notice::success("Uploaded"));
        assert_eq!(session.state(), SubmissionState::Succeeded);
        assert_eq!(session.fields(), &FormFields::default());
        assert!(session.selected_file().is_none());
        assert_eq!(session.zone_view().heading, "Drag & Drop your paper here");
        assert_eq!(session.submit_label(), "Upload Paper");

        session.settle();
        assert_eq!(session.state(), SubmissionState::Idle);
    }

    #[test]
    fn test_rejection_keeps_form() {
        let mut session = filled_session();
        session.begin_submit(&target()).unwrap();
        let fields_before = session.fields().clone();

        let notice = session
            .finish(Ok(UploadOutcome { success: false, message: "Please create your researcher profile first.".into(), paper_id: None }))
            .unwrap();

        assert_eq!(notice, Notice::error("Please create your researcher profile first."));
        assert_eq!(session.state(), SubmissionState::Failed);
        assert_eq!(session.fields(), &fields_before);
        assert_eq!(session.zone_view().detail, "paper.pdf");
        assert!(!session.is_submitting());
        assert_eq!(session.submit_label(), "Upload Paper");
    }

    #[test]
    fn test_rejection_without_message_uses_fallback() {
        let mut session = filled_session();
        session.begin_submit(&target()).unwrap();
        let notice = session
            .finish(Ok(UploadOutcome { success: false, message: String::new(), paper_id: None }))
            .unwrap();
        assert_eq!(notice.message, "An error occurred while uploading the file");
    }

    #[test]
    fn test_transport_failure_keeps_form() {
        let mut session = filled_session();
        session.begin_submit(&target()).unwrap();

        let notice = session
            .finish(Err(AppError::Network("Failed to fetch".into())))
            .unwrap();

        assert_eq!(notice.message, "An error occurred: Failed to fetch");
        assert_eq!(session.state(), SubmissionState::Failed);
        assert_eq!(session.fields().title, "Paper A");
        assert!(session.selected_file().is_some());

        session.settle();
        assert!(session.begin_submit(&target()).is_ok());
    }

    #[test]
    fn test_finish_outside_submission_is_ignored() {
        let mut session = filled_session();
        let before = session.clone();
        let outcome = UploadOutcome { success: true, message: "Uploaded".into(), paper_id: None };
        assert_eq!(session.finish(Ok(outcome)), None);
        assert_eq!(session, before);
    }

    #[test]
    fn test_settle_from_idle_is_noop() {
        let mut session = UploadSession::<StubFile>::new();
        session.settle();
        assert_eq!(session.state(), SubmissionState::Idle);
    }
}
