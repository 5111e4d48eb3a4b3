//! Page helpers installed on `window`.
//!
//! Server-rendered templates call these from inline handlers such as
//! `oninput="checkPasswordStrength()"`, which resolve names on the global
//! object. [`install_page_helpers`] puts each one there at start-up with the
//! same argument defaults as the Rust functions.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, HtmlFormElement, Window};

use crate::config::DEFAULT_LOADING_LABEL;
use crate::effects::validate_form;
use crate::loading::{hide_loading, show_loading};
use crate::password::{check_password_match, check_password_strength, toggle_password};

/// Global names defined by [`install_page_helpers`].
pub const PAGE_HELPERS: &[&str] = &[
    "showLoading",
    "hideLoading",
    "togglePassword",
    "checkPasswordStrength",
    "checkPasswordMatch",
    "validateForm",
];

const DEFAULT_PASSWORD_ID: &str = "password";
const DEFAULT_CONFIRM_ID: &str = "confirmPassword";
const DEFAULT_STRENGTH_BAR_ID: &str = "strengthBar";
const DEFAULT_MATCH_INDICATOR_ID: &str = "passwordMatch";

/// Defines every name in [`PAGE_HELPERS`] on `window`.
pub fn install_page_helpers() {
    let window = gloo_utils::window();
    for name in PAGE_HELPERS {
        match helper(name) {
            Some(function) => define(&window, name, &function),
            None => log::warn!("No page helper named {}", name),
        }
    }
    log::debug!("Page helpers installed: {}", PAGE_HELPERS.join(", "));
}

fn define(window: &Window, name: &str, function: &JsValue) {
    if let Err(e) = js_sys::Reflect::set(window, &JsValue::from_str(name), function) {
        log::warn!("Failed to define {}: {:?}", name, e);
    }
}

/// An omitted or non-string argument takes `default`.
fn arg_or(value: Option<String>, default: &str) -> String {
    value.unwrap_or_else(|| default.to_string())
}

fn helper(name: &str) -> Option<JsValue> {
    let function = match name {
        "showLoading" => Closure::wrap(Box::new(|control: JsValue, label: JsValue| {
            if let Ok(control) = control.dyn_into::<HtmlElement>() {
                show_loading(&control, &arg_or(label.as_string(), DEFAULT_LOADING_LABEL));
            }
        }) as Box<dyn FnMut(JsValue, JsValue)>)
        .into_js_value(),

        "hideLoading" => Closure::wrap(Box::new(|control: JsValue| {
            if let Ok(control) = control.dyn_into::<HtmlElement>() {
                hide_loading(&control);
            }
        }) as Box<dyn FnMut(JsValue)>)
        .into_js_value(),

        "togglePassword" => Closure::wrap(Box::new(|field_id: JsValue, icon_id: JsValue| {
            if let (Some(field_id), Some(icon_id)) = (field_id.as_string(), icon_id.as_string()) {
                toggle_password(&field_id, &icon_id);
            }
        }) as Box<dyn FnMut(JsValue, JsValue)>)
        .into_js_value(),

        // Score, or `undefined` when the bar is missing
        "checkPasswordStrength" => Closure::wrap(Box::new(|password_id: JsValue, bar_id: JsValue| {
            check_password_strength(
                &arg_or(password_id.as_string(), DEFAULT_PASSWORD_ID),
                &arg_or(bar_id.as_string(), DEFAULT_STRENGTH_BAR_ID),
            )
            .map(|s| JsValue::from(s.score))
            .unwrap_or(JsValue::UNDEFINED)
        }) as Box<dyn FnMut(JsValue, JsValue) -> JsValue>)
        .into_js_value(),

        // Match flag, or `undefined` while the confirmation is empty
        "checkPasswordMatch" => Closure::wrap(Box::new(
            |password_id: JsValue, confirm_id: JsValue, indicator_id: JsValue| {
                check_password_match(
                    &arg_or(password_id.as_string(), DEFAULT_PASSWORD_ID),
                    &arg_or(confirm_id.as_string(), DEFAULT_CONFIRM_ID),
                    &arg_or(indicator_id.as_string(), DEFAULT_MATCH_INDICATOR_ID),
                )
                .and_then(|m| m.as_bool())
                .map(JsValue::from_bool)
                .unwrap_or(JsValue::UNDEFINED)
            },
        ) as Box<dyn FnMut(JsValue, JsValue, JsValue) -> JsValue>)
        .into_js_value(),

        "validateForm" => Closure::wrap(Box::new(|form: JsValue| {
            form.dyn_into::<HtmlFormElement>()
                .map(|form| validate_form(&form))
                .unwrap_or(false)
        }) as Box<dyn FnMut(JsValue) -> bool>)
        .into_js_value(),

        _ => return None,
    };
    Some(function)
}
