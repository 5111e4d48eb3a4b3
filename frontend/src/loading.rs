//! Loading state for buttons.
//!
//! [`show_loading`] stashes a control's content in `data-original-text`,
//! swaps in a spinner and disables it. [`hide_loading`] puts everything back,
//! and does nothing on a control that was never put into loading state.

use web_sys::HtmlElement;

const ORIGINAL_TEXT_ATTR: &str = "data-original-text";
const LOADING_CLASS: &str = "loading";

/// A control that can be put into loading state.
pub trait LoadingTarget {
    fn content(&self) -> String;
    fn set_content(&self, html: &str);
    fn attribute(&self, name: &str) -> Option<String>;
    fn set_attribute(&self, name: &str, value: &str);
    fn remove_attribute(&self, name: &str);
    fn set_disabled(&self, disabled: bool);
    fn toggle_class(&self, class: &str, on: bool);
}

impl LoadingTarget for HtmlElement {
    fn content(&self) -> String {
        self.inner_html()
    }

    fn set_content(&self, html: &str) {
        self.set_inner_html(html);
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        if let Err(e) = web_sys::Element::set_attribute(self, name, value) {
            log::warn!("Failed to set {}: {:?}", name, e);
        }
    }

    fn remove_attribute(&self, name: &str) {
        if let Err(e) = web_sys::Element::remove_attribute(self, name) {
            log::warn!("Failed to remove {}: {:?}", name, e);
        }
    }

    fn set_disabled(&self, disabled: bool) {
        if disabled {
            LoadingTarget::set_attribute(self, "disabled", "");
        } else {
            LoadingTarget::remove_attribute(self, "disabled");
        }
    }

    fn toggle_class(&self, class: &str, on: bool) {
        if let Err(e) = self.class_list().toggle_with_force(class, on) {
            log::warn!("Failed to toggle class {}: {:?}", class, e);
        }
    }
}

fn spinner_markup(label: &str) -> String {
    format!(r#"<i class="fas fa-spinner fa-spin me-2"></i>{}"#, label)
}

/// Puts `control` into loading state with `label`.
pub fn show_loading<T: LoadingTarget + ?Sized>(control: &T, label: &str) {
    // A second call must not overwrite the stashed original with the spinner.
    if control.attribute(ORIGINAL_TEXT_ATTR).is_none() {
        let original = control.content();
        control.set_attribute(ORIGINAL_TEXT_ATTR, &original);
    }
    control.set_content(&spinner_markup(label));
    control.set_disabled(true);
    control.toggle_class(LOADING_CLASS, true);
}

/// Restores a control put into loading state by [`show_loading`].
pub fn hide_loading<T: LoadingTarget + ?Sized>(control: &T) {
    let Some(original) = control.attribute(ORIGINAL_TEXT_ATTR) else {
        return;
    };
    control.set_content(&original);
    control.remove_attribute(ORIGINAL_TEXT_ATTR);
    control.set_disabled(false);
    control.toggle_class(LOADING_CLASS, false);
}
