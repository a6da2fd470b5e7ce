//! Alert Dialog Component
//!
//! Blocking modal for operation results. Content comes from `Dialogs::alert`.

use leptos::prelude::*;

use crate::context::use_app_context;

/// Modal alert with icon, message and a single dismiss button
#[component]
pub fn AlertDialog() -> impl IntoView {
    let dialogs = use_app_context().dialogs;

    move || {
        dialogs.alert.get().map(|spec| {
            let class = format!("dialog alert-dialog {}", spec.kind.class());
            view! {
                <div class="dialog-backdrop">
                    <div class=class role="alertdialog">
                        <h2 class="dialog-title">
                            <span class="dialog-icon">{spec.kind.icon()}</span>
                            {spec.title}
                        </h2>
                        <p class="dialog-message">{spec.message}</p>
                        <div class="dialog-actions">
                            <button class="primary-btn" on:click=move |_| dialogs.close_alert()>
                                {spec.button_text}
                            </button>
                        </div>
                    </div>
                </div>
            }
        })
    }
}
