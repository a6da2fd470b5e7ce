//! Confirm Dialog Component
//!
//! Yes/no modal. The answer is delivered through `Dialogs::answer`.

use leptos::prelude::*;

use crate::context::use_app_context;

#[component]
pub fn ConfirmDialog() -> impl IntoView {
    let dialogs = use_app_context().dialogs;

    move || {
        dialogs.confirm.get().map(|spec| {
            view! {
                <div class="dialog-backdrop" on:click=move |_| dialogs.answer(false)>
                    <div class="dialog confirm-dialog" role="dialog" on:click=|ev| ev.stop_propagation()>
                        <h2 class="dialog-title">{spec.title}</h2>
                        <p class="dialog-message">{spec.message}</p>
                        <div class="dialog-actions">
                            <button class="cancel-btn" on:click=move |_| dialogs.answer(false)>
                                {spec.cancel_text}
                            </button>
                            <button class="danger-btn" on:click=move |_| dialogs.answer(true)>
                                {spec.confirm_text}
                            </button>
                        </div>
                    </div>
                </div>
            }
        })
    }
}
