//! Todo Board Component
//!
//! Pending and completed columns with drag-and-drop between and within them.
//! Uses leptos-dragdrop with explicit DropZones between cards.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::*;

use crate::actions;
use crate::board::{Board, DropEvent, Partition};
use crate::components::TodoCard;
use crate::context::use_app_context;
use crate::models::Todo;

/// Both board columns, sharing one drag state
#[component]
pub fn TodoBoard(board: RwSignal<Board>, on_edit: Callback<Todo>) -> impl IntoView {
    let ctx = use_app_context();

    // Create DnD signals
    let dnd = create_dnd_signals();

    bind_global_handlers(dnd, move |source, slot| {
        let (Some(previous), Some(current)) = (Partition::from_key(source.list), Partition::from_key(slot.list)) else {
            log::warn!(target: "dnd", "Drop between unknown lists {} -> {}", source.list, slot.list);
            return;
        };
        let event = DropEvent::from_slot(previous, source.index, current, slot.index);
        log::debug!(target: "dnd", "Drop: {:?}", event);

        let api = ctx.todos_api();
        let dialogs = ctx.dialogs;
        spawn_local(async move {
            let feedback = actions::drop_todo(&api, &board, event).await;
            dialogs.show(feedback);
        });
    });

    view! {
        <div class="todo-board">
            <TodoColumn title="To Do" partition=Partition::Pending board=board dnd=dnd on_edit=on_edit />
            <TodoColumn title="Completed" partition=Partition::Completed board=board dnd=dnd on_edit=on_edit />
        </div>
    }
}

/// One partition rendered as a droppable list
#[component]
fn TodoColumn(
    title: &'static str,
    partition: Partition,
    board: RwSignal<Board>,
    dnd: DndSignals,
    on_edit: Callback<Todo>,
) -> impl IntoView {
    let entries = move || {
        board.with(|b| b.partition(partition).iter().cloned().enumerate().collect::<Vec<_>>())
    };
    let count = move || board.with(|b| b.partition(partition).len());
    let empty_text = match partition {
        Partition::Pending => "Nothing left to do",
        Partition::Completed => "No completed tasks yet",
    };

    view! {
        <section class=format!("todo-column {}", partition.key())>
            <h2>{title} <span class="count">{count}</span></h2>

            <Show when=move || count() == 0 && !dnd.is_active()>
                <p class="empty-column">{empty_text}</p>
            </Show>

            <For
                each=entries
                key=|(index, todo)| {
                    // Index is part of the key so handlers see the current position
                    (*index, todo.id.clone(), todo.completed, todo.text.clone())
                }
                children=move |(index, todo)| {
                    let slot = DropSlot { list: partition.key(), index };
                    view! {
                        <DropZone dnd=dnd at=slot />
                        <TodoCard
                            todo=todo
                            index=index
                            partition=partition
                            board=board
                            dnd=dnd
                            on_edit=on_edit
                        />
                    }
                }
            />

            // Trailing zone: append to the end of this column
            {move || {
                let slot = DropSlot { list: partition.key(), index: count() };
                view! { <DropZone dnd=dnd at=slot /> }
            }}
        </section>
    }
}

/// Drop zone component - a horizontal separator for dropping cards
#[component]
pub fn DropZone(dnd: DndSignals, at: DropSlot) -> impl IntoView {
    let on_mouseenter = make_on_zone_mouseenter(dnd, at);
    let on_mouseleave = make_on_mouseleave(dnd);

    let zone_class = move || {
        let mut c = String::from("drop-zone");
        // Only show when dragging
        if !dnd.is_active() { c.push_str(" hidden"); }
        if dnd.is_target(at) { c.push_str(" active"); }
        c
    };

    view! {
        <div
            class=zone_class
            on:mouseenter=on_mouseenter
            on:mouseleave=on_mouseleave
        />
    }
}
