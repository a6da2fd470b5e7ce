//! Todo Detail Page
//!
//! Single todo by id, with toggle-complete and delete.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::actions;
use crate::api::TodosApi;
use crate::context::use_app_context;
use crate::dialogs::{messages, ConfirmSpec};
use crate::guards::TODOS_PATH;
use crate::models::{Todo, TodoId};

#[derive(Clone, Debug, PartialEq)]
enum DetailState {
    Loading,
    Loaded(Todo),
    Failed,
}

#[component]
pub fn TodoDetailPage() -> impl IntoView {
    let ctx = use_app_context();
    let params = use_params_map();
    let navigate = use_navigate();

    let state = RwSignal::new(DetailState::Loading);
    let (toggling, set_toggling) = signal(false);
    let (deleting, set_deleting) = signal(false);
    let (deleted, set_deleted) = signal(false);

    // Fetch whenever the id in the URL changes
    let fetch_ctx = ctx.clone();
    Effect::new(move |_| {
        let Some(id) = params.with(|p| p.get("id")) else {
            state.set(DetailState::Failed);
            return;
        };
        let api = fetch_ctx.todos_api();
        state.set(DetailState::Loading);
        spawn_local(async move {
            match api.get_todo(&TodoId::new(id)).await {
                Ok(todo) => state.set(DetailState::Loaded(todo)),
                Err(err) => {
                    log::warn!(target: "detail", "Fetching todo failed: {}", err);
                    state.set(DetailState::Failed);
                }
            }
        });
    });

    // Leave once the todo is gone
    let leave = navigate.clone();
    Effect::new(move |_| {
        if deleted.get() {
            leave(TODOS_PATH, Default::default());
        }
    });

    let current = move || match state.get() {
        DetailState::Loaded(todo) => Some(todo),
        _ => None,
    };

    let toggle_ctx = ctx.clone();
    let toggle_complete = move |_| {
        let Some(todo) = current() else { return };
        let api = toggle_ctx.todos_api();
        let dialogs = toggle_ctx.dialogs;
        set_toggling.set(true);
        spawn_local(async move {
            match actions::toggle_todo(&api, &todo).await {
                Ok(updated) => state.set(DetailState::Loaded(updated)),
                Err(feedback) => dialogs.show(feedback),
            }
            set_toggling.set(false);
        });
    };

    let delete_todo = move |_| {
        let Some(todo) = current() else { return };
        let ctx = ctx.clone();
        let dialogs = ctx.dialogs;
        dialogs.ask(ConfirmSpec::delete_task(), move |confirmed| {
            if !confirmed {
                return;
            }
            let api = ctx.todos_api();
            let id = todo.id.clone();
            set_deleting.set(true);
            spawn_local(async move {
                let result = actions::delete_single(&api, &id).await;
                set_deleting.set(false);
                match result {
                    Ok(()) => set_deleted.set(true),
                    Err(feedback) => dialogs.show(feedback),
                }
            });
        });
    };

    let go_back = move |_| navigate(TODOS_PATH, Default::default());

    view! {
        <div class="todo-detail-page">
            <button class="back-btn" on:click=go_back>"← Back to tasks"</button>

            {move || match state.get() {
                DetailState::Loading => view! { <p class="loading">"Loading task..."</p> }.into_any(),
                DetailState::Failed => view! { <p class="load-error">{messages::DETAIL_LOAD_FAILED}</p> }.into_any(),
                DetailState::Loaded(todo) => {
                    let toggle_complete = toggle_complete.clone();
                    let delete_todo = delete_todo.clone();
                    view! {
                        <article class="todo-detail">
                            <h1>{todo.text.clone()}</h1>
                            <dl>
                                <dt>"ID"</dt>
                                <dd>{todo.id.to_string()}</dd>
                                <dt>"Owner"</dt>
                                <dd>{todo.owner_id}</dd>
                                <dt>"Status"</dt>
                                <dd>
                                    <span class=if todo.completed { "status-chip done" } else { "status-chip open" }>
                                        {if todo.completed { "Completed" } else { "Pending" }}
                                    </span>
                                </dd>
                            </dl>
                            <div class="detail-actions">
                                <button class="primary-btn" disabled=move || toggling.get() on:click=toggle_complete>
                                    {move || match (toggling.get(), todo.completed) {
                                        (true, _) => "Saving...",
                                        (false, true) => "Mark as pending",
                                        (false, false) => "Mark as completed",
                                    }}
                                </button>
                                <button class="danger-btn" disabled=move || deleting.get() on:click=delete_todo>
                                    {move || if deleting.get() { "Deleting..." } else { "Delete" }}
                                </button>
                            </div>
                        </article>
                    }
                    .into_any()
                }
            }}
        </div>
    }
}
