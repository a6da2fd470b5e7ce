//! Todos API
//!
//! CRUD client for the remote todo collection. Every record coming back is
//! normalized to a [`Todo`] with a string [`TodoId`].

use async_trait::async_trait;
use gloo_net::http::Request;

use super::{authorized, read_json, read_optional_json};
use crate::config::AppConfig;
use crate::error::ApiResult;
use crate::models::{CreatedTodo, Todo, TodoId, TodoListBody, TodoPage};

/// Operations the board and detail views need from the todo backend
#[async_trait(?Send)]
pub trait TodosApi {
    /// `GET /todos`
    async fn list_todos(&self) -> ApiResult<TodoPage>;

    /// `GET /todos/{id}`
    async fn get_todo(&self, id: &TodoId) -> ApiResult<Todo>;

    /// `PATCH /todos/{id}` with `{completed}`
    async fn update_todo(&self, id: &TodoId, completed: bool) -> ApiResult<Todo>;

    /// `POST /todos` with a new, not yet completed record
    async fn add_todo(&self, text: &str, owner_id: u32) -> ApiResult<Todo>;

    /// `DELETE /todos/{id}`; some servers answer with an empty body
    async fn delete_todo(&self, id: &TodoId) -> ApiResult<Option<Todo>>;
}

/// HTTP implementation over `gloo-net`
#[derive(Debug, Clone)]
pub struct TodosClient {
    config: AppConfig,
    token: Option<String>,
}

impl TodosClient {
    pub fn new(config: AppConfig, token: Option<String>) -> Self {
        Self { config, token }
    }
}

#[async_trait(?Send)]
impl TodosApi for TodosClient {
    async fn list_todos(&self) -> ApiResult<TodoPage> {
        let request = authorized(Request::get(&self.config.todos_api_url), self.token.as_deref());
        let body: TodoListBody = read_json(request.send().await?).await?;
        Ok(body.into())
    }

    async fn get_todo(&self, id: &TodoId) -> ApiResult<Todo> {
        let request = authorized(Request::get(&self.config.todo_url(id.as_str())), self.token.as_deref());
        read_json(request.send().await?).await
    }

    async fn update_todo(&self, id: &TodoId, completed: bool) -> ApiResult<Todo> {
        #[derive(serde::Serialize)]
        struct Patch {
            completed: bool,
        }

        let request = authorized(Request::patch(&self.config.todo_url(id.as_str())), self.token.as_deref())
            .json(&Patch { completed })?;
        read_json(request.send().await?).await
    }

    async fn add_todo(&self, text: &str, owner_id: u32) -> ApiResult<Todo> {
        let client_id = client_todo_id(js_sys::Date::now(), js_sys::Math::random());
        let new_todo = Todo::new(client_id.clone(), text, false, owner_id);

        let request = authorized(Request::post(&self.config.todos_api_url), self.token.as_deref())
            .json(&new_todo)?;
        let created: CreatedTodo = read_json(request.send().await?).await?;
        Ok(created.into_todo(client_id))
    }

    async fn delete_todo(&self, id: &TodoId) -> ApiResult<Option<Todo>> {
        let request = authorized(Request::delete(&self.config.todo_url(id.as_str())), self.token.as_deref())
            .header("Content-Type", "application/json");
        read_optional_json(request.send().await?).await
    }
}

/// Client-side id for a new todo: `todo_<epoch ms>_<random in base 36>`.
/// Used whenever the server does not assign one.
pub fn client_todo_id(now_ms: f64, random: f64) -> TodoId {
    TodoId::new(format!("todo_{}_{}", now_ms.max(0.0) as u64, base36_fraction(random)))
}

/// Render a number in `[0, 1)` as a base-36 fraction (`0.k3j9...`)
fn base36_fraction(value: f64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    const MAX_DIGITS: usize = 11;

    let mut frac = value.fract().abs();
    let mut out = String::from("0.");
    for _ in 0..MAX_DIGITS {
        if frac <= 0.0 {
            break;
        }
        frac *= 36.0;
        let digit = frac.trunc() as usize;
        out.push(DIGITS[digit.min(35)] as char);
        frac -= frac.trunc();
    }
    if out.len() == 2 {
        out.truncate(1);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_todo_id_shape() {
        let id = client_todo_id(1_700_000_000_123.0, 0.5);
        assert_eq!(id.as_str(), "todo_1700000000123_0.i");
    }

    #[test]
    fn test_base36_fraction() {
        assert_eq!(base36_fraction(0.0), "0");
        assert_eq!(base36_fraction(0.25), "0.9");
        let long = base36_fraction(0.123456789);
        assert!(long.starts_with("0."));
        assert!(long.len() <= 13);
        assert!(long[2..].chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_client_ids_differ_by_random_part() {
        let a = client_todo_id(1000.0, 0.1);
        let b = client_todo_id(1000.0, 0.2);
        assert_ne!(a, b);
    }
}
