//! Paper upload form with drag & drop support.
//!
//! All upload UI is derived from one [`UploadSession`] signal. The handlers
//! only forward browser events into the session; submission goes through
//! [`submit_attempt`].

use leptos::*;
use web_sys::{File, FileList, HtmlInputElement};

use crate::components::notification::{use_notifications, Notifications};
use crate::config::{AppConfig, NoticeStyle};
use crate::services::{alert, csrf_token, submit_attempt, HttpUploader};
use crate::session::UploadSession;
use crate::types::{Notice, NotificationKind};

fn files_of(list: &FileList) -> Vec<File> {
    (0..list.length()).filter_map(|i| list.get(i)).collect()
}

/// Shows a notice the way the page is configured to.
fn present(style: NoticeStyle, notifications: Option<Notifications>, notice: &Notice) {
    match (style, notifications) {
        (NoticeStyle::Toast, Some(notifications)) => {
            notifications.notify(notice.message.clone(), notice.kind)
        }
        _ => alert(&notice.message),
    }
}

#[component]
pub fn UploadForm(config: AppConfig) -> impl IntoView {
    let session = create_rw_signal(UploadSession::<File>::new());
    let form_ref = create_node_ref::<html::Form>();
    let file_input = create_node_ref::<html::Input>();
    let notifications = use_notifications();

    let notice_style = config.notice_style;
    let categories = config.categories.clone();
    let upload_url = config.upload_url.clone();
    let accept = config.accept.clone();
    let file_field = config.file_field.clone();
    let config = store_value(config);

    let submitting = move || session.with(|s| s.is_submitting());
    let zone = move || session.with(|s| s.zone_view());

    // Browse button opens the hidden picker
    let on_browse = move |ev: ev::MouseEvent| {
        ev.prevent_default();
        if let Some(input) = file_input.get_untracked() {
            input.click();
        }
    };

    let on_file_change = move |ev: ev::Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(list) = input.files() {
            session.update(|s| {
                s.select_file(files_of(&list));
            });
        }
    };

    let on_drag_over = move |ev: ev::DragEvent| {
        ev.prevent_default();
        session.update(|s| s.drag_over());
    };

    let on_drag_leave = move |_: ev::DragEvent| {
        session.update(|s| s.drag_leave());
    };

    let on_drop = move |ev: ev::DragEvent| {
        ev.prevent_default();
        let dropped = ev.data_transfer().and_then(|dt| dt.files());

        // Mirror the drop into the input so its own file list matches.
        if let (Some(list), Some(input)) = (&dropped, file_input.get_untracked()) {
            if list.length() > 0 {
                input.set_files(Some(list));
            }
        }

        let files = dropped.as_ref().map(files_of).unwrap_or_default();
        session.update(|s| {
            s.drop_files(files);
        });
    };

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();

        let target = config.with_value(|c| c.upload_target(csrf_token()));
        spawn_local(async move {
            submit_attempt(session, target, &HttpUploader, move |notice| {
                if notice.kind == NotificationKind::Success {
                    if let Some(form) = form_ref.get_untracked() {
                        form.reset();
                    }
                }
                present(notice_style, notifications, notice);
            })
            .await;
        });
    };

    view! {
        <form
            id="uploadForm"
            class="upload-form"
            action=upload_url
            method="post"
            enctype="multipart/form-data"
            node_ref=form_ref
            on:submit=on_submit
        >
            <div class="form-floating mb-3">
                <input
                    type="text"
                    class="form-control"
                    id="paperTitle"
                    name="title"
                    placeholder="Enter paper title"
                    prop:value=move || session.with(|s| s.fields().title.clone())
                    on:input=move |ev| session.update(|s| s.set_title(event_target_value(&ev)))
                />
                <label for="paperTitle">"Paper title"</label>
            </div>

            <div class="form-floating mb-3">
                <select
                    class="form-select form-control"
                    id="paperCategory"
                    name="category"
                    prop:value=move || session.with(|s| s.fields().category.clone())
                    on:change=move |ev| session.update(|s| s.set_category(event_target_value(&ev)))
                >
                    <option value="">"Choose a category"</option>
                    {categories
                        .into_iter()
                        .map(|category| view! { <option value=category.clone()>{category}</option> })
                        .collect_view()}
                </select>
                <label for="paperCategory">"Category"</label>
            </div>

            <div
                class="upload-area glass-card-small"
                id="uploadArea"
                class:dragover=move || session.with(|s| s.is_drag_active())
                on:dragover=on_drag_over
                on:dragleave=on_drag_leave
                on:drop=on_drop
            >
                <i class=move || zone().icon_class></i>
                <h6>{move || zone().heading}</h6>
                <p>{move || zone().detail}</p>
                <button type="button" class="btn btn-secondary-glass" on:click=on_browse>
                    "Browse files"
                </button>
                <input
                    type="file"
                    id="fileInput"
                    name=file_field
                    accept=accept
                    style="display:none"
                    node_ref=file_input
                    on:change=on_file_change
                />
            </div>

            <button
                type="submit"
                class="btn btn-primary-glass w-100"
                class:loading=submitting
                disabled=submitting
            >
                {move || {
                    let label = session.with(|s| s.submit_label());
                    if submitting() {
                        view! { <i class="fas fa-spinner fa-spin me-2"></i>{label} }.into_view()
                    } else {
                        label.into_view()
                    }
                }}
            </button>
        </form>
    }
}
