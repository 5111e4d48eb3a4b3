//! Password strength meter, match indicator and visibility toggle.
//!
//! The scoring and matching rules are plain functions; the `check_*` and
//! [`toggle_password`] helpers apply them to elements looked up by id and do
//! nothing when those elements are missing.

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, HtmlInputElement};

use crate::effects::set_style;

/// Highest score [`password_strength`] can give.
pub const MAX_STRENGTH: u8 = 5;

const STRENGTH_BAR_CLASS: &str = "password-strength-bar";
const MATCH_CLASS: &str = "password-match";
const TOGGLE_PULSE_MS: u32 = 150;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrengthLevel {
    Weak,
    Medium,
    Strong,
}

impl StrengthLevel {
    pub fn css_class(&self) -> &'static str {
        match self {
            StrengthLevel::Weak => "strength-weak",
            StrengthLevel::Medium => "strength-medium",
            StrengthLevel::Strong => "strength-strong",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PasswordStrength {
    /// Criteria met, 0..=5
    pub score: u8,
    pub level: StrengthLevel,
}

impl PasswordStrength {
    pub fn width_percent(&self) -> f64 {
        f64::from(self.score) / f64::from(MAX_STRENGTH) * 100.0
    }

    /// Full `class` attribute for the strength bar.
    pub fn bar_class(&self) -> String {
        format!("{} {}", STRENGTH_BAR_CLASS, self.level.css_class())
    }
}

/// Scores a password: one point each for length ≥ 8, a lowercase letter, an
/// uppercase letter, a digit, and any other character.
pub fn password_strength(password: &str) -> PasswordStrength {
    let criteria = [
        password.chars().count() >= 8,
        password.chars().any(|c| c.is_ascii_lowercase()),
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ];
    let score = criteria.iter().filter(|met| **met).count() as u8;

    let level = match score {
        0..=2 => StrengthLevel::Weak,
        3..=4 => StrengthLevel::Medium,
        _ => StrengthLevel::Strong,
    };

    PasswordStrength { score, level }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PasswordMatch {
    /// Confirmation not typed yet
    Empty,
    Match,
    Mismatch,
}

impl PasswordMatch {
    pub fn text(&self) -> &'static str {
        match self {
            PasswordMatch::Empty => "",
            PasswordMatch::Match => "✓ Passwords match",
            PasswordMatch::Mismatch => "✗ Passwords do not match",
        }
    }

    pub fn class_name(&self) -> String {
        match self {
            PasswordMatch::Empty => MATCH_CLASS.to_string(),
            PasswordMatch::Match => format!("{} match-success", MATCH_CLASS),
            PasswordMatch::Mismatch => format!("{} match-error", MATCH_CLASS),
        }
    }

    /// `None` while the confirmation is empty.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PasswordMatch::Empty => None,
            PasswordMatch::Match => Some(true),
            PasswordMatch::Mismatch => Some(false),
        }
    }
}

pub fn password_match(password: &str, confirm: &str) -> PasswordMatch {
    if confirm.is_empty() {
        PasswordMatch::Empty
    } else if password == confirm {
        PasswordMatch::Match
    } else {
        PasswordMatch::Mismatch
    }
}

// =============================================================================
// DOM helpers
// =============================================================================

fn element_by_id(id: &str) -> Option<Element> {
    gloo_utils::document().get_element_by_id(id)
}

fn input_value(id: &str) -> String {
    element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.value())
        .unwrap_or_default()
}

/// Updates the strength bar `bar_id` from the input `password_id`.
pub fn check_password_strength(password_id: &str, bar_id: &str) -> Option<PasswordStrength> {
    let bar = element_by_id(bar_id)?.dyn_into::<HtmlElement>().ok()?;
    let strength = password_strength(&input_value(password_id));

    if let Err(e) = bar
        .style()
        .set_property("width", &format!("{}%", strength.width_percent()))
    {
        log::warn!("Failed to size strength bar: {:?}", e);
    }
    bar.set_class_name(&strength.bar_class());

    Some(strength)
}

/// Updates the match indicator from the two password inputs.
pub fn check_password_match(
    password_id: &str,
    confirm_id: &str,
    indicator_id: &str,
) -> Option<PasswordMatch> {
    let indicator = element_by_id(indicator_id)?;
    let status = password_match(&input_value(password_id), &input_value(confirm_id));

    indicator.set_text_content(Some(status.text()));
    indicator.set_class_name(&status.class_name());

    Some(status)
}

/// Shows or hides the password in `field_id` and swaps the eye icon.
pub fn toggle_password(field_id: &str, icon_id: &str) {
    let Some(input) = element_by_id(field_id).and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    else {
        return;
    };
    let Some(icon) = element_by_id(icon_id).and_then(|el| el.dyn_into::<HtmlElement>().ok()) else {
        return;
    };

    if input.type_() == "password" {
        input.set_type("text");
        icon.set_class_name("fas fa-eye-slash");
    } else {
        input.set_type("password");
        icon.set_class_name("fas fa-eye");
    }

    set_style(&icon, "transform", "scale(1.2)");
    wasm_bindgen_futures::spawn_local(async move {
        TimeoutFuture::new(TOGGLE_PULSE_MS).await;
        set_style(&icon, "transform", "scale(1)");
    });
}
