//! UI Components
//!
//! Reusable Leptos components.

mod alert_dialog;
mod confirm_dialog;
mod edit_todo_dialog;
mod navbar;
mod new_todo_form;
mod toast;
mod todo_board;
mod todo_card;

pub use alert_dialog::AlertDialog;
pub use confirm_dialog::ConfirmDialog;
pub use edit_todo_dialog::EditTodoDialog;
pub use navbar::Navbar;
pub use new_todo_form::NewTodoForm;
pub use toast::Toast;
pub use todo_board::TodoBoard;
pub use todo_card::TodoCard;
