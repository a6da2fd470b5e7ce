//! Pages
//!
//! Route-level views.

mod login;
mod todo_detail;
mod todos;

pub use login::LoginPage;
pub use todo_detail::TodoDetailPage;
pub use todos::TodosPage;
