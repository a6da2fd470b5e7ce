//! Toast Component
//!
//! Transient, non-blocking notice (e.g. after a drag changed a status).

use leptos::prelude::*;

use crate::context::use_app_context;

#[component]
pub fn Toast() -> impl IntoView {
    let dialogs = use_app_context().dialogs;

    move || {
        dialogs.toast.get().map(|(_, text)| {
            view! { <div class="toast" role="status">{text}</div> }
        })
    }
}
