//! New Todo Form Component
//!
//! Text + "completed" toggle; submits through `actions::add_todo`.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions::{self, AddOutcome, NewTodo};
use crate::board::{validate_todo_text, Board};
use crate::context::use_app_context;

/// Form for adding a todo to the board
#[component]
pub fn NewTodoForm(board: RwSignal<Board>) -> impl IntoView {
    let ctx = use_app_context();
    let min_len = ctx.config.min_todo_len;

    let (new_text, set_new_text) = signal(String::new());
    let (completed, set_completed) = signal(false);
    let (touched, set_touched) = signal(false);
    let (adding, set_adding) = signal(false);

    let validation = move || validate_todo_text(&new_text.get(), min_len).err();
    let invalid = move || validation().is_some();

    let create_todo = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_touched.set(true);
        if invalid() || adding.get_untracked() {
            return;
        }
        let text = new_text.get_untracked();
        let intent = completed.get_untracked();
        let owner_id = ctx.config.default_owner_id;
        let api = ctx.todos_api();
        let dialogs = ctx.dialogs;

        set_adding.set(true);
        spawn_local(async move {
            let new_todo = NewTodo { text: &text, completed: intent, owner_id };
            let outcome = actions::add_todo(&api, &board, new_todo, min_len).await;
            if matches!(outcome, AddOutcome::Added { .. }) {
                set_new_text.set(String::new());
                set_completed.set(false);
                set_touched.set(false);
            }
            set_adding.set(false);
            dialogs.show(outcome.feedback());
        });
    };

    view! {
        <form class="new-todo-form" on:submit=create_todo>
            <div class="new-todo-row">
                <input
                    type="text"
                    placeholder="Add a new task..."
                    prop:value=move || new_text.get()
                    on:input=move |ev| set_new_text.set(event_target_value(&ev))
                    on:blur=move |_| set_touched.set(true)
                />
                <label class="completed-toggle">
                    <input
                        type="checkbox"
                        prop:checked=move || completed.get()
                        on:change=move |ev| set_completed.set(event_target_checked(&ev))
                    />
                    "Completed"
                </label>
                <button type="submit" disabled=move || invalid() || adding.get()>
                    {move || if adding.get() { "Adding..." } else { "Add" }}
                </button>
            </div>
            {move || {
                if touched.get() {
                    validation().map(|err| view! { <p class="field-error">{err.to_string()}</p> })
                } else {
                    None
                }
            }}
        </form>
    }
}
