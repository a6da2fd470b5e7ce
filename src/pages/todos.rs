//! Todos Page
//!
//! The board: loads every todo once on mount and keeps the partitions
//! locally from then on.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions::{self, EditOutcome};
use crate::board::Board;
use crate::components::{EditTodoDialog, NewTodoForm, TodoBoard};
use crate::context::use_app_context;
use crate::dialogs::messages;
use crate::models::Todo;

#[component]
pub fn TodosPage() -> impl IntoView {
    let ctx = use_app_context();

    // State
    let board = RwSignal::new(Board::default());
    let (loading, set_loading) = signal(true);
    let (load_failed, set_load_failed) = signal(false);
    let editing = RwSignal::new(None::<Todo>);

    // Load todos on mount
    Effect::new(move |_| {
        let api = ctx.todos_api();
        spawn_local(async move {
            match actions::load_board(&api).await {
                Ok(loaded) => {
                    board.set(loaded);
                }
                Err(err) => {
                    log::error!(target: "board", "Loading todos failed: {}", err);
                    set_load_failed.set(true);
                }
            }
            set_loading.set(false);
        });
    });

    let on_edit = Callback::new(move |todo: Todo| editing.set(Some(todo)));
    let on_edit_closed = Callback::new(move |outcome: EditOutcome| actions::apply_edit(&board, outcome));

    view! {
        <div class="todos-page">
            <h1>"My Tasks"</h1>

            <NewTodoForm board=board />

            <Show
                when=move || !loading.get()
                fallback=|| view! { <p class="loading">"Loading tasks..."</p> }
            >
                <Show when=move || load_failed.get()>
                    <p class="load-error">{messages::LOAD_FAILED}</p>
                </Show>
                <Show when=move || !load_failed.get() && board.with(Board::is_empty)>
                    <p class="empty-board">"No tasks yet. Add one above."</p>
                </Show>
                <TodoBoard board=board on_edit=on_edit />
            </Show>

            <p class="todo-count">
                {move || board.with(|b| format!("{} pending, {} completed", b.pending().len(), b.completed().len()))}
            </p>

            <EditTodoDialog editing=editing on_close=on_edit_closed />
        </div>
    }
}
