//! Board Actions
//!
//! Async orchestration between the board partitions and the todos API,
//! plus the sign-in flow that feeds the session.
//! Each action mutates the board only through a [`BoardHandle`], so the
//! same code drives the Leptos signal in the browser and a plain `RefCell`
//! in tests.

use std::cell::RefCell;

use leptos::prelude::*;

use crate::api::{AuthApi, TodosApi};
use crate::board::{validate_todo_text, Board, DropEvent, DropOutcome, MergePolicy, Partition, ValidationError};
use crate::dialogs::{messages, Feedback};
use crate::error::{ApiError, ApiResult};
use crate::models::{Todo, TodoId};
use crate::session::SessionContext;

/// Mutable access to the board wherever it lives
pub trait BoardHandle {
    /// Run `f` against the current board; `None` if the board is gone
    /// (e.g. the view was unmounted while a request was in flight).
    fn with_board<R>(&self, f: impl FnOnce(&mut Board) -> R) -> Option<R>;
}

impl BoardHandle for RwSignal<Board> {
    fn with_board<R>(&self, f: impl FnOnce(&mut Board) -> R) -> Option<R> {
        self.try_update(f)
    }
}

impl BoardHandle for RefCell<Board> {
    fn with_board<R>(&self, f: impl FnOnce(&mut Board) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

/// Fetch every todo and split it into partitions
pub async fn load_board<A: TodosApi>(api: &A) -> ApiResult<Board> {
    let page = api.list_todos().await?;
    log::info!(target: "board", "Loaded {} todos ({} total on server)", page.todos.len(), page.total);
    Ok(Board::from_todos(page.todos))
}

/// Apply a drop optimistically, confirm it remotely, roll back on failure.
///
/// There is no cancellation: a failure is reconciled against whatever the
/// partitions look like when it arrives.
pub async fn drop_todo<A: TodosApi, B: BoardHandle>(api: &A, board: &B, event: DropEvent) -> Feedback {
    let outcome = board.with_board(|b| b.drop_item(event)).unwrap_or(DropOutcome::Ignored);
    let pending = match outcome {
        DropOutcome::Moved(pending) => pending,
        DropOutcome::Reordered => {
            log::debug!(target: "dnd", "Reordered {:?}: {} -> {}", event.current, event.previous_index, event.current_index);
            return Feedback::Silent;
        }
        DropOutcome::Ignored => return Feedback::Silent,
    };

    let status = pending.new_status();
    log::info!(target: "dnd", "Moving {} to {:?}", pending.todo.id, pending.to);
    match api.update_todo(&pending.todo.id, status).await {
        Ok(_) => Feedback::Toast(status_toast(&pending.todo.text, status)),
        Err(err) => {
            log::warn!(target: "dnd", "Status update for {} failed, rolling back: {}", pending.todo.id, err);
            board.with_board(|b| b.rollback(&pending));
            Feedback::error(messages::UPDATE_FAILED)
        }
    }
}

fn status_toast(text: &str, completed: bool) -> String {
    if completed {
        format!("\"{}\" marked as completed", text)
    } else {
        format!("\"{}\" moved back to pending", text)
    }
}

/// Result of submitting the add form
#[derive(Debug, Clone, PartialEq)]
pub enum AddOutcome {
    /// Rejected locally; nothing was sent
    Invalid(ValidationError),
    Added { todo: Todo, partition: Partition },
    Failed(ApiError),
}

impl AddOutcome {
    pub fn feedback(&self) -> Feedback {
        match self {
            AddOutcome::Invalid(_) => Feedback::Silent,
            AddOutcome::Added { .. } => Feedback::success(messages::ADD_SUCCEEDED),
            AddOutcome::Failed(_) => Feedback::error(messages::ADD_FAILED),
        }
    }
}

/// Parameters of the add form
#[derive(Debug, Clone, PartialEq)]
pub struct NewTodo<'a> {
    pub text: &'a str,
    pub completed: bool,
    pub owner_id: u32,
}

/// Validate, create remotely, then place the result per the form's
/// `completed` choice (client wins over the server's echo).
pub async fn add_todo<A: TodosApi, B: BoardHandle>(api: &A, board: &B, new_todo: NewTodo<'_>, min_len: usize) -> AddOutcome {
    let text = match validate_todo_text(new_todo.text, min_len) {
        Ok(text) => text,
        Err(err) => return AddOutcome::Invalid(err),
    };

    match api.add_todo(text, new_todo.owner_id).await {
        Ok(created) => {
            let partition = board
                .with_board(|b| b.insert_added(created.clone(), new_todo.completed, MergePolicy::ClientWins))
                .unwrap_or(Partition::for_completed(new_todo.completed));
            log::info!(target: "board", "Added {} to {:?}", created.id, partition);
            let mut todo = created;
            todo.completed = new_todo.completed;
            AddOutcome::Added { todo, partition }
        }
        Err(err) => {
            log::warn!(target: "board", "Add failed: {}", err);
            AddOutcome::Failed(err)
        }
    }
}

/// Delete an already-confirmed todo and drop it from the board
pub async fn delete_todo<A: TodosApi, B: BoardHandle>(api: &A, board: &B, id: &TodoId) -> Feedback {
    match api.delete_todo(id).await {
        Ok(_) => {
            board.with_board(|b| b.remove(id));
            log::info!(target: "board", "Deleted {}", id);
            Feedback::success(messages::DELETE_SUCCEEDED)
        }
        Err(err) => {
            log::warn!(target: "board", "Delete of {} failed: {}", id, err);
            Feedback::error(messages::DELETE_FAILED)
        }
    }
}

/// Flip one todo's status (detail view / edit dialog). Returns the server's record.
pub async fn toggle_todo<A: TodosApi>(api: &A, todo: &Todo) -> Result<Todo, Feedback> {
    api.update_todo(&todo.id, !todo.completed).await.map_err(|err| {
        log::warn!(target: "detail", "Toggle of {} failed: {}", todo.id, err);
        Feedback::error(messages::UPDATE_FAILED)
    })
}

/// Delete one todo outside the board (detail view / edit dialog)
pub async fn delete_single<A: TodosApi>(api: &A, id: &TodoId) -> Result<(), Feedback> {
    api.delete_todo(id).await.map(|_| ()).map_err(|err| {
        log::warn!(target: "detail", "Delete of {} failed: {}", id, err);
        Feedback::error(messages::DELETE_FAILED)
    })
}

/// How the quick-edit dialog was closed
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    /// Status toggled; carries the server's record
    Updated(Todo),
    Deleted(TodoId),
}

/// Fold a quick-edit result back into the board
pub fn apply_edit<B: BoardHandle>(board: &B, outcome: EditOutcome) {
    board.with_board(|b| match outcome {
        EditOutcome::Updated(todo) => b.apply_server_update(todo),
        EditOutcome::Deleted(id) => {
            b.remove(&id);
        }
    });
}

/// Exchange credentials and start the session. Any failure leaves the
/// store untouched and yields the inline login message.
pub async fn sign_in<A: AuthApi>(
    auth: &A,
    session: &SessionContext,
    username: &str,
    password: &str,
) -> Result<(), &'static str> {
    let username = username.trim();
    let result = match auth.login(username, password).await {
        Ok(response) => session.begin(response),
        Err(err) => Err(err),
    };
    result.map_err(|err| {
        match &err {
            ApiError::InvalidCredentials => log::info!(target: "login", "Rejected credentials for {}", username),
            other => log::error!(target: "login", "Login failed: {}", other),
        }
        messages::LOGIN_FAILED
    })
}
