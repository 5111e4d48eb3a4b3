//! Glassmorphism page effects.
//!
//! Attaches hover, focus, scroll and click flourishes to whatever matching
//! elements the page contains. Every effect is best-effort: selectors that
//! match nothing simply attach nothing.
//!
//! Listeners live for the page lifetime, so their closures are leaked.

use gloo_timers::future::TimeoutFuture;
use rand::Rng;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, HtmlFormElement, HtmlInputElement,
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, ScrollBehavior,
    ScrollIntoViewOptions, ScrollLogicalPosition,
};

use crate::config::{INVALID_HIGHLIGHT_MS, RIPPLE_DURATION_MS};

const PARTICLE_SELECTOR: &str = ".particle";
const FORM_CONTROL_SELECTOR: &str = ".form-control";
const FLOATING_CONTAINER_SELECTOR: &str = ".form-floating, .input-group";
const HOVER_BUTTON_SELECTOR: &str = ".btn-primary-glass, .btn-secondary-glass, .btn-login, .btn-signup";
const RIPPLE_BUTTON_SELECTOR: &str = ".btn-primary-glass, .btn-secondary-glass";
const ANIMATED_SELECTOR: &str = ".glass-card-small, .content-area > *";
const ANCHOR_SELECTOR: &str = r##"a[href^="#"]"##;

const SCROLL_THRESHOLD: f64 = 0.1;
const SCROLL_ROOT_MARGIN: &str = "0px 0px -50px 0px";

/// Attaches every effect. Safe to call on any page.
pub fn init_glassmorphism() {
    let document = gloo_utils::document();

    init_particles(&document);
    init_form_effects(&document);
    init_animations(&document);
    init_utilities(&document);

    log::debug!("✨ Glass effects initialized");
}

// =============================================================================
// Helpers
// =============================================================================

fn query_all(root: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = root.query_selector_all(selector) else {
        log::warn!("Invalid selector: {}", selector);
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn listen(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
        log::warn!("Failed to listen for {}: {:?}", event, e);
    }
    closure.forget();
}

pub(crate) fn set_style(element: &HtmlElement, property: &str, value: &str) {
    if let Err(e) = element.style().set_property(property, value) {
        log::warn!("Failed to set {}: {:?}", property, e);
    }
}

/// Runs `apply` on the event's current target as an `HtmlElement`.
fn on_current(event: &Event, apply: impl FnOnce(&HtmlElement)) {
    if let Some(element) = event
        .current_target()
        .and_then(|t| t.dyn_into::<HtmlElement>().ok())
    {
        apply(&element);
    }
}

// =============================================================================
// Particles
// =============================================================================

fn init_particles(document: &Document) {
    for particle in query_all(document, PARTICLE_SELECTOR) {
        listen(&particle, "mouseenter", |ev| {
            on_current(&ev, |el| {
                set_style(el, "transform", "scale(1.2)");
                set_style(el, "opacity", "1");
            })
        });
        listen(&particle, "mouseleave", |ev| {
            on_current(&ev, |el| {
                set_style(el, "transform", "scale(1)");
                set_style(el, "opacity", "0.7");
            })
        });
        listen(&particle, "animationiteration", |ev| {
            on_current(&ev, drift_particle);
        });
    }
}

/// Nudges a particle up to 5px sideways from its current `left`.
fn drift_particle(particle: &HtmlElement) {
    let offset: f64 = rand::thread_rng().gen_range(-5.0..5.0);

    let mut left = particle.style().get_property_value("left").unwrap_or_default();
    if left.is_empty() {
        left = gloo_utils::window()
            .get_computed_style(particle)
            .ok()
            .flatten()
            .and_then(|style| style.get_property_value("left").ok())
            .unwrap_or_else(|| "0px".to_string());
    }

    set_style(particle, "left", &format!("calc({} + {:.2}px)", left, offset));
}

// =============================================================================
// Form effects
// =============================================================================

fn init_form_effects(document: &Document) {
    for input in query_all(document, FORM_CONTROL_SELECTOR) {
        listen(&input, "focus", |ev| lift_container(&ev, "translateY(-2px)"));
        listen(&input, "blur", |ev| lift_container(&ev, "translateY(0)"));
        listen(&input, "input", |ev| {
            on_current(&ev, |el| {
                let filled = js_sys::Reflect::get(el, &JsValue::from_str("value"))
                    .ok()
                    .and_then(|v| v.as_string())
                    .is_some_and(|v| !v.is_empty());
                let tint = if filled {
                    "rgba(255, 255, 255, 0.15)"
                } else {
                    "rgba(255, 255, 255, 0.1)"
                };
                set_style(el, "background", tint);
            })
        });
    }

    for button in query_all(document, HOVER_BUTTON_SELECTOR) {
        listen(&button, "mouseenter", |ev| {
            on_current(&ev, |el| set_style(el, "transform", "translateY(-2px) scale(1.02)"))
        });
        listen(&button, "mouseleave", |ev| {
            on_current(&ev, |el| set_style(el, "transform", "translateY(0) scale(1)"))
        });
    }
}

fn lift_container(event: &Event, transform: &str) {
    on_current(event, |el| {
        if let Some(container) = el
            .closest(FLOATING_CONTAINER_SELECTOR)
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<HtmlElement>().ok())
        {
            set_style(&container, "transform", transform);
        }
    });
}

// =============================================================================
// Scroll animations
// =============================================================================

fn init_animations(document: &Document) {
    let targets = query_all(document, ANIMATED_SELECTOR);
    if targets.is_empty() {
        return;
    }

    let callback = Closure::wrap(Box::new(move |entries: js_sys::Array, _: IntersectionObserver| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                continue;
            };
            if entry.is_intersecting() {
                if let Err(e) = entry
                    .target()
                    .class_list()
                    .add_2("animate__animated", "animate__fadeInUp")
                {
                    log::warn!("Failed to animate element: {:?}", e);
                }
            }
        }
    }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(SCROLL_THRESHOLD));
    options.set_root_margin(SCROLL_ROOT_MARGIN);

    let observer =
        match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options) {
            Ok(observer) => observer,
            Err(e) => {
                log::warn!("IntersectionObserver unavailable: {:?}", e);
                return;
            }
        };
    callback.forget();

    for target in &targets {
        observer.observe(target);
    }
}

// =============================================================================
// Utilities
// =============================================================================

fn init_utilities(document: &Document) {
    for anchor in query_all(document, ANCHOR_SELECTOR) {
        listen(&anchor, "click", smooth_scroll);
    }
    for button in query_all(document, RIPPLE_BUTTON_SELECTOR) {
        listen(&button, "click", create_ripple);
    }
}

fn smooth_scroll(event: Event) {
    let Some(anchor) = event
        .current_target()
        .and_then(|t| t.dyn_into::<Element>().ok())
    else {
        return;
    };
    let Some(href) = anchor.get_attribute("href") else {
        return;
    };
    event.prevent_default();

    // A bare "#" is not a valid selector.
    let target = gloo_utils::document().query_selector(&href).ok().flatten();

    if let Some(target) = target {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        target.scroll_into_view_with_scroll_into_view_options(&options);
    }
}

fn create_ripple(event: Event) {
    let Some(button) = event
        .current_target()
        .and_then(|t| t.dyn_into::<Element>().ok())
    else {
        return;
    };
    let Some(document) = button.owner_document() else {
        return;
    };
    let Ok(ripple) = document.create_element("span") else {
        return;
    };
    ripple.set_class_name("ripple");

    if button.append_child(&ripple).is_err() {
        return;
    }
    wasm_bindgen_futures::spawn_local(async move {
        TimeoutFuture::new(RIPPLE_DURATION_MS).await;
        ripple.remove();
    });
}

// =============================================================================
// Form validation
// =============================================================================

/// Highlights blank `input[required]` fields of `form` for a few seconds.
///
/// Returns `true` when every required input has a value.
pub fn validate_form(form: &HtmlFormElement) -> bool {
    let Ok(list) = form.query_selector_all("input[required]") else {
        return false;
    };

    let mut valid = true;
    for input in (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<HtmlInputElement>().ok())
    {
        if !input.value().trim().is_empty() {
            continue;
        }
        valid = false;
        set_style(&input, "border-color", "#ff4757");
        set_style(&input, "box-shadow", "0 0 0 0.25rem rgba(255, 71, 87, 0.25)");

        wasm_bindgen_futures::spawn_local(async move {
            TimeoutFuture::new(INVALID_HIGHLIGHT_MS).await;
            set_style(&input, "border-color", "");
            set_style(&input, "box-shadow", "");
        });
    }
    valid
}
