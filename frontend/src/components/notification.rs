//! Toast notifications.
//!
//! [`provide_notifications`] registers a [`Notifications`] handle in the
//! reactive context; [`NotificationStack`] renders the live toasts. Each toast
//! fades out after its duration and is removed once the fade has played.

use gloo_timers::future::TimeoutFuture;
use leptos::*;

use crate::config::{NOTIFICATION_DURATION_MS, NOTIFICATION_FADE_MS};
use crate::types::NotificationKind;

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub kind: NotificationKind,
    /// Fade-out has started
    pub leaving: bool,
}

/// Handle for pushing toasts. Cheap to copy into event handlers.
#[derive(Clone, Copy)]
pub struct Notifications {
    toasts: RwSignal<Vec<Toast>>,
    next_id: StoredValue<u64>,
}

impl Notifications {
    pub fn new() -> Self {
        Self {
            toasts: create_rw_signal(Vec::new()),
            next_id: store_value(0),
        }
    }

    /// Shows a toast for the default duration.
    pub fn notify(&self, message: impl Into<String>, kind: NotificationKind) {
        self.notify_for(message, kind, NOTIFICATION_DURATION_MS);
    }

    pub fn notify_for(&self, message: impl Into<String>, kind: NotificationKind, duration_ms: u32) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);

        self.toasts.update(|toasts| {
            toasts.push(Toast { id, message: message.into(), kind, leaving: false });
        });

        let toasts = self.toasts;
        spawn_local(async move {
            TimeoutFuture::new(duration_ms).await;
            toasts.update(|list| {
                if let Some(toast) = list.iter_mut().find(|t| t.id == id) {
                    toast.leaving = true;
                }
            });
            TimeoutFuture::new(NOTIFICATION_FADE_MS).await;
            toasts.update(|list| list.retain(|t| t.id != id));
        });
    }

    pub fn toasts(&self) -> Signal<Vec<Toast>> {
        self.toasts.into()
    }
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new()
    }
}

pub fn provide_notifications() -> Notifications {
    let notifications = Notifications::new();
    provide_context(notifications);
    notifications
}

pub fn use_notifications() -> Option<Notifications> {
    use_context::<Notifications>()
}

#[component]
pub fn NotificationStack(notifications: Notifications) -> impl IntoView {
    view! {
        <div class="notification-stack">
            <For
                each=move || notifications.toasts().get()
                key=|toast| (toast.id, toast.leaving)
                children=move |toast| {
                    let class_name = format!(
                        "notification {} animate__animated {}",
                        toast.kind.css_class(),
                        if toast.leaving { "animate__fadeOutUp" } else { "animate__fadeInDown" },
                    );
                    let icon = format!("fas fa-{} me-2", toast.kind.icon());
                    view! {
                        <div class=class_name role="status">
                            <div class="notification-content">
                                <i class=icon></i>
                                {toast.message}
                            </div>
                        </div>
                    }
                }
            />
        </div>
    }
}
