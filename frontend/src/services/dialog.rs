//! Blocking browser dialogs.

/// Shows `message` in a modal `window.alert` and waits for acknowledgement.
pub fn alert(message: &str) {
    if let Err(e) = gloo_utils::window().alert_with_message(message) {
        log::error!("Failed to show alert: {:?}", e);
    }
}
