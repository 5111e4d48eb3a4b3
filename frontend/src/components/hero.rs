//! Card header above the upload form

use leptos::*;

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <div class="hero text-center mb-4">
            <h2 class="text-glass">"Upload Research Paper"</h2>
            <p class="subtitle text-glass-muted">
                "Give your paper a title, pick a category and drop the document below."
            </p>
        </div>
    }
}
