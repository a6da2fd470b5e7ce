//! Edit Todo Dialog Component
//!
//! Quick-edit modal opened from a board card: toggle status or delete
//! without leaving the list.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions::{self, EditOutcome};
use crate::context::use_app_context;
use crate::dialogs::ConfirmSpec;
use crate::models::Todo;

/// Modal for the todo in `editing`; closed when it is `None`
#[component]
pub fn EditTodoDialog(editing: RwSignal<Option<Todo>>, on_close: Callback<EditOutcome>) -> impl IntoView {
    let ctx = use_app_context();
    let dialogs = ctx.dialogs;
    let (loading, set_loading) = signal(false);
    let (deleting, set_deleting) = signal(false);
    let busy = move || loading.get() || deleting.get();

    let toggle_ctx = ctx.clone();
    let toggle = move |_| {
        let Some(todo) = editing.get_untracked() else { return };
        let api = toggle_ctx.todos_api();
        set_loading.set(true);
        spawn_local(async move {
            match actions::toggle_todo(&api, &todo).await {
                Ok(updated) => {
                    editing.set(None);
                    on_close.run(EditOutcome::Updated(updated));
                }
                Err(feedback) => dialogs.show(feedback),
            }
            set_loading.set(false);
        });
    };

    let delete = move |_| {
        let Some(todo) = editing.get_untracked() else { return };
        let ctx = ctx.clone();
        dialogs.ask(ConfirmSpec::delete_task(), move |confirmed| {
            if !confirmed {
                return;
            }
            let api = ctx.todos_api();
            let id = todo.id.clone();
            set_deleting.set(true);
            spawn_local(async move {
                match actions::delete_single(&api, &id).await {
                    Ok(()) => {
                        editing.set(None);
                        on_close.run(EditOutcome::Deleted(id));
                    }
                    Err(feedback) => dialogs.show(feedback),
                }
                set_deleting.set(false);
            });
        });
    };

    move || {
        editing.get().map(|todo| {
            let toggle = toggle.clone();
            let delete = delete.clone();
            view! {
                <div class="dialog-backdrop">
                    <div class="dialog edit-todo-dialog" role="dialog">
                        <h2 class="dialog-title">"Task #" {todo.id.to_string()}</h2>
                        <p class="dialog-message">{todo.text.clone()}</p>
                        <span class=if todo.completed { "status-chip done" } else { "status-chip open" }>
                            {if todo.completed { "Completed" } else { "Pending" }}
                        </span>
                        <div class="dialog-actions">
                            <button class="cancel-btn" disabled=busy on:click=move |_| editing.set(None)>
                                "Close"
                            </button>
                            <button class="danger-btn" disabled=busy on:click=delete>
                                {move || if deleting.get() { "Deleting..." } else { "Delete" }}
                            </button>
                            <button class="primary-btn" disabled=busy on:click=toggle>
                                {move || match (loading.get(), todo.completed) {
                                    (true, _) => "Saving...",
                                    (false, true) => "Mark as pending",
                                    (false, false) => "Mark as completed",
                                }}
                            </button>
                        </div>
                    </div>
                </div>
            }
        })
    }
}
