//! HTTP upload of a paper to the form's action.

use gloo_net::http::Request;
use leptos::{RwSignal, SignalUpdate};
use wasm_bindgen::JsCast;
use web_sys::{File, FormData, HtmlDocument};

use crate::config::{CSRF_COOKIE_NAME, CSRF_HEADER, REQUESTED_WITH_HEADER, REQUESTED_WITH_VALUE};
use crate::session::{UploadRequest, UploadSession, UploadTarget};
use crate::types::{AppError, AppResult, FileHandle, Notice, UploadOutcome};

/// Sends one upload request and resolves to the server's structured result.
///
/// The browser implementation is [`HttpUploader`]; tests substitute a fake.
#[allow(async_fn_in_trait)]
pub trait UploadTransport<F> {
    async fn send(&self, request: UploadRequest<F>) -> AppResult<UploadOutcome>;
}

/// `fetch`-based transport posting multipart form data.
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpUploader;

impl UploadTransport<File> for HttpUploader {
    async fn send(&self, request: UploadRequest<File>) -> AppResult<UploadOutcome> {
        let form_data = FormData::new().map_err(AppError::browser)?;
        for (name, value) in &request.fields {
            form_data
                .append_with_str(name, value)
                .map_err(AppError::browser)?;
        }
        form_data
            .append_with_blob_and_filename(&request.file_field, &request.file, &request.file.name())
            .map_err(AppError::browser)?;

        let mut builder =
            Request::post(&request.action).header(REQUESTED_WITH_HEADER, REQUESTED_WITH_VALUE);
        if let Some(token) = &request.csrf_token {
            builder = builder.header(CSRF_HEADER, token);
        }

        let response = builder
            .body(form_data)
            .map_err(|e| AppError::Network(format!("Failed to build request: {}", e)))?
            .send()
            .await
            .map_err(network_error)?;

        if !response.ok() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Server { status: response.status(), body });
        }

        let body = response
            .text()
            .await
            .map_err(network_error)?;
        parse_outcome(&body)
    }
}

/// Keeps only the message of a thrown JS error, without its `TypeError: ` prefix.
fn network_error(e: gloo_net::Error) -> AppError {
    match e {
        gloo_net::Error::JsError(js) => AppError::Network(js.message),
        other => AppError::Network(other.to_string()),
    }
}

/// Runs one submission attempt against `session`.
///
/// Validation failures are presented without sending anything; a re-entry
/// while an upload is in flight is only logged. Otherwise exactly one request
/// goes through `transport`, and its notice is presented once the session
/// has left `Submitting`, before it settles back to idle. Returns the
/// presented notice.
pub async fn submit_attempt<F, T>(
    session: RwSignal<UploadSession<F>>,
    target: UploadTarget,
    transport: &T,
    present: impl Fn(&Notice),
) -> Option<Notice>
where
    F: FileHandle,
    T: UploadTransport<F>,
{
    let request = match session.try_update(|s| s.begin_submit(&target))? {
        Ok(request) => request,
        Err(AppError::AlreadySubmitting) => {
            log::warn!("Submit ignored: an upload is already in progress");
            return None;
        }
        Err(e) => {
            log::info!("Submit blocked: {}", e);
            let notice = Notice::error(e.to_string());
            present(&notice);
            return Some(notice);
        }
    };

    let result = transport.send(request).await;

    let notice = session.try_update(|s| s.finish(result)).flatten()?;
    present(&notice);
    session.update(|s| s.settle());
    Some(notice)
}

/// Parses the `{success, message}` reply.
pub fn parse_outcome(body: &str) -> AppResult<UploadOutcome> {
    serde_json::from_str(body).map_err(|e| AppError::Parse(e.to_string()))
}

/// Value of cookie `name` in a `document.cookie` string.
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

/// CSRF token from the page's cookies, if any.
pub fn csrf_token() -> Option<String> {
    let cookies = gloo_utils::document()
        .dyn_into::<HtmlDocument>()
        .ok()?
        .cookie()
        .ok()?;
    cookie_value(&cookies, CSRF_COOKIE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::tests::{filled_session, target, StubFile};
    use crate::session::SubmissionState;
    use crate::types::NotificationKind;
    use futures::executor::block_on;
    use leptos::{create_runtime, create_rw_signal, SignalWithUntracked};
    use std::cell::RefCell;

    /// Records every request and answers with a canned result.
    struct RecordingTransport {
        sent: RefCell<Vec<UploadRequest<StubFile>>>,
        reply: AppResult<UploadOutcome>,
    }

    impl RecordingTransport {
        fn replying(reply: AppResult<UploadOutcome>) -> Self {
            Self { sent: RefCell::new(Vec::new()), reply }
        }

        fn uploaded() -> Self {
            Self::replying(Ok(UploadOutcome {
                success: true,
                message: "Uploaded".into(),
                paper_id: None,
            }))
        }
    }

    impl UploadTransport<StubFile> for RecordingTransport {
        async fn send(&self, request: UploadRequest<StubFile>) -> AppResult<UploadOutcome> {
            self.sent.borrow_mut().push(request);
            self.reply.clone()
        }
    }

    /// Transport that checks the session has left `Submitting` by the time
    /// the notice is presented.
    struct InspectingTransport<'a> {
        session: RwSignal<UploadSession<StubFile>>,
        seen: &'a RefCell<Vec<SubmissionState>>,
    }

    impl UploadTransport<StubFile> for InspectingTransport<'_> {
        async fn send(&self, _request: UploadRequest<StubFile>) -> AppResult<UploadOutcome> {
            self.seen
                .borrow_mut()
                .push(self.session.with_untracked(|s| s.state()));
            Ok(UploadOutcome { success: true, message: "Uploaded".into(), paper_id: None })
        }
    }

    #[test]
    fn test_parse_outcome() {
        let outcome = parse_outcome(r#"{"success": true, "message": "Uploaded"}"#).unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.message, "Uploaded");
    }

    #[test]
    fn test_parse_outcome_rejects_html() {
        let err = parse_outcome("<!DOCTYPE html><html></html>").unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }

    #[test]
    fn test_parse_outcome_null_message() {
        let outcome = parse_outcome(r#"{"success": false, "message": null}"#).unwrap();
        assert!(!outcome.success);
        assert!(outcome.message.is_empty());
    }

    #[test]
    fn test_network_error_message() {
        let err = network_error(gloo_net::Error::GlooError("connection refused".into()));
        match err {
            AppError::Network(message) => assert!(message.contains("connection refused")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_cookie_value() {
        let cookies = "sessionid=xyz; csrftoken=Tok3n; theme=dark";
        assert_eq!(cookie_value(cookies, "csrftoken").as_deref(), Some("Tok3n"));
        assert_eq!(cookie_value(cookies, "missing"), None);
        assert_eq!(cookie_value("csrftoken=", "csrftoken"), None);
        assert_eq!(cookie_value("", "csrftoken"), None);
    }

    #[test]
    fn test_empty_title_sends_nothing() {
        let runtime = create_runtime();
        let transport = RecordingTransport::uploaded();
        let session = create_rw_signal(filled_session());
        session.update(|s| s.set_title(""));
        let presented = RefCell::new(Vec::new());

        let notice = block_on(submit_attempt(session, target(), &transport, |n| {
            presented.borrow_mut().push(n.clone())
        }))
        .unwrap();

        assert_eq!(notice.message, "Please enter a paper title");
        assert_eq!(notice.kind, NotificationKind::Error);
        assert_eq!(*presented.borrow(), vec![notice]);
        assert!(transport.sent.borrow().is_empty());
        session.with_untracked(|s| {
            assert_eq!(s.state(), SubmissionState::Idle);
            assert_eq!(s.fields().category, "cs.AI");
        });

        runtime.dispose();
    }

    #[test]
    fn test_valid_form_sends_exactly_one_request() {
        let runtime = create_runtime();
        let transport = RecordingTransport::uploaded();
        let session = create_rw_signal(filled_session());
        let presented = RefCell::new(Vec::new());

        let notice = block_on(submit_attempt(session, target(), &transport, |n| {
            presented.borrow_mut().push(n.clone())
        }))
        .unwrap();
        assert_eq!(notice.message, "Uploaded");
        assert_eq!(presented.borrow().len(), 1);

        let sent = transport.sent.borrow();
        assert_eq!(sent.len(), 1);
        let request = &sent[0];
        assert!(request.fields.contains(&("title".to_string(), "Paper A".to_string())));
        assert!(request.fields.contains(&("category".to_string(), "cs.AI".to_string())));
        assert_eq!(request.file.name, "paper.pdf");
        assert_eq!(request.file_field, "document");

        session.with_untracked(|s| {
            assert_eq!(s.state(), SubmissionState::Idle);
            assert_eq!(s.zone_view().heading, "Drag & Drop your paper here");
            assert!(s.fields().title.is_empty());
        });

        runtime.dispose();
    }

    #[test]
    fn test_notice_presented_after_button_restored() {
        let runtime = create_runtime();
        let session = create_rw_signal(filled_session());
        let seen = RefCell::new(Vec::new());
        let transport = InspectingTransport { session, seen: &seen };

        block_on(submit_attempt(session, target(), &transport, |_| {
            seen.borrow_mut().push(session.with_untracked(|s| s.state()))
        }));

        assert_eq!(
            *seen.borrow(),
            vec![SubmissionState::Submitting, SubmissionState::Succeeded]
        );
        assert_eq!(session.with_untracked(|s| s.state()), SubmissionState::Idle);

        runtime.dispose();
    }

    #[test]
    fn test_submit_while_in_flight_is_ignored() {
        let runtime = create_runtime();
        let transport = RecordingTransport::uploaded();
        let session = create_rw_signal(filled_session());
        session.update(|s| {
            s.begin_submit(&target()).unwrap();
        });
        let presented = RefCell::new(Vec::new());

        let notice = block_on(submit_attempt(session, target(), &transport, |n| {
            presented.borrow_mut().push(n.clone())
        }));

        assert!(notice.is_none());
        assert!(presented.borrow().is_empty());
        assert!(transport.sent.borrow().is_empty());
        assert!(session.with_untracked(|s| s.is_submitting()));

        runtime.dispose();
    }

    #[test]
    fn test_rejected_upload_can_be_retried() {
        let runtime = create_runtime();
        let transport = RecordingTransport::replying(Ok(UploadOutcome {
            success: false,
            message: "Please upload a document file.".into(),
            paper_id: None,
        }));
        let session = create_rw_signal(filled_session());

        let first = block_on(submit_attempt(session, target(), &transport, |_| {})).unwrap();
        assert_eq!(first.message, "Please upload a document file.");
        assert_eq!(session.with_untracked(|s| s.fields().title.clone()), "Paper A");

        block_on(submit_attempt(session, target(), &transport, |_| {}));
        assert_eq!(transport.sent.borrow().len(), 2);

        runtime.dispose();
    }

    #[test]
    fn test_null_message_rejection_uses_fallback() {
        let runtime = create_runtime();
        let reply = parse_outcome(r#"{"success": false, "message": null}"#);
        let transport = RecordingTransport::replying(reply);
        let session = create_rw_signal(filled_session());

        let notice = block_on(submit_attempt(session, target(), &transport, |_| {})).unwrap();
        assert_eq!(notice.message, "An error occurred while uploading the file");

        runtime.dispose();
    }

    #[test]
    fn test_server_error_is_transport_failure() {
        let runtime = create_runtime();
        let transport = RecordingTransport::replying(Err(AppError::Server {
            status: 500,
            body: "Internal Server Error".into(),
        }));
        let session = create_rw_signal(filled_session());

        let notice = block_on(submit_attempt(session, target(), &transport, |_| {})).unwrap();
        assert_eq!(notice.message, "An error occurred: server responded with status 500");
        assert_eq!(session.with_untracked(|s| s.zone_view().detail), "paper.pdf");

        runtime.dispose();
    }
}
