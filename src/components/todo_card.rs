//! Todo Card Component
//!
//! One draggable row in a board column.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::*;
use leptos_router::hooks::use_navigate;

use crate::actions;
use crate::board::{Board, Partition};
use crate::context::use_app_context;
use crate::dialogs::ConfirmSpec;
use crate::guards::todo_path;
use crate::models::Todo;

/// A single todo in a board column
#[component]
pub fn TodoCard(
    todo: Todo,
    /// Position within its partition
    index: usize,
    partition: Partition,
    board: RwSignal<Board>,
    dnd: DndSignals,
    on_edit: Callback<Todo>,
) -> impl IntoView {
    let ctx = use_app_context();
    let navigate = use_navigate();

    let source = DragSource { list: partition.key(), index };
    let on_mousedown = make_on_mousedown(dnd, source);
    let on_mouseenter = make_on_item_mouseenter(dnd, partition.key(), index);
    let on_mouseleave = make_on_mouseleave(dnd);

    let slot = DropSlot { list: partition.key(), index };
    let card_class = move || {
        let mut c = String::from("todo-card");
        if partition.is_completed() { c.push_str(" completed"); }
        if dnd.is_dragging(source) { c.push_str(" dragging"); }
        if dnd.is_target(slot) { c.push_str(" drop-target"); }
        c
    };

    let detail_path = todo_path(todo.id.as_str());
    let open_details = move |_| {
        // The click that ends a drag is not a request to open the todo
        if !dnd.drag_just_ended_read.get_untracked() {
            navigate(&detail_path, Default::default());
        }
    };

    let id = todo.id.clone();
    let confirm_delete = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        let ctx = ctx.clone();
        let id = id.clone();
        let dialogs = ctx.dialogs;
        dialogs.ask(ConfirmSpec::delete_task(), move |confirmed| {
            if !confirmed {
                return;
            }
            let api = ctx.todos_api();
            let id = id.clone();
            spawn_local(async move {
                let feedback = actions::delete_todo(&api, &board, &id).await;
                dialogs.show(feedback);
            });
        });
    };

    let edit_target = todo.clone();
    let open_edit = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        on_edit.run(edit_target.clone());
    };

    view! {
        <div
            class=card_class
            on:mousedown=on_mousedown
            on:mouseenter=on_mouseenter
            on:mouseleave=on_mouseleave
            on:click=open_details
        >
            <span class="drag-handle">"⠿"</span>
            <span class="todo-text">{todo.text.clone()}</span>
            <button class="edit-btn" title="Quick edit" on:click=open_edit>"✎"</button>
            <button class="delete-btn" title="Delete" on:click=confirm_delete>"×"</button>
        </div>
    }
}
