//! Frontend Models
//!
//! Data structures matching the remote todo and auth APIs.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Todo identifier.
///
/// Servers hand out integers, the client generates strings; both are kept
/// in string form so ids compare and route uniformly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TodoId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<u64> for TodoId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for TodoId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum WireId {
            Int(i64),
            Str(String),
        }

        Ok(match WireId::deserialize(deserializer)? {
            WireId::Int(n) => TodoId(n.to_string()),
            WireId::Str(s) => TodoId(s),
        })
    }
}

/// Todo data structure (matches the todo API record)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    /// Task text; the API calls this field `todo`
    #[serde(rename = "todo")]
    pub text: String,
    pub completed: bool,
    #[serde(rename = "userId", default)]
    pub owner_id: u32,
}

impl Todo {
    pub fn new(id: impl Into<TodoId>, text: impl Into<String>, completed: bool, owner_id: u32) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            completed,
            owner_id,
        }
    }
}

/// Record returned by `POST /todos`. Some deployments omit the id.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedTodo {
    #[serde(default)]
    pub id: Option<TodoId>,
    #[serde(rename = "todo")]
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(rename = "userId", default)]
    pub owner_id: u32,
}

impl CreatedTodo {
    /// Resolve into a [`Todo`], falling back to the client-generated id
    pub fn into_todo(self, fallback_id: TodoId) -> Todo {
        Todo {
            id: self.id.unwrap_or(fallback_id),
            text: self.text,
            completed: self.completed,
            owner_id: self.owner_id,
        }
    }
}

/// `GET /todos` body: a bare array, or a paginated envelope
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TodoListBody {
    Bare(Vec<Todo>),
    Page(TodoPage),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TodoPage {
    pub todos: Vec<Todo>,
    #[serde(default)]
    pub total: usize,
    #[serde(default)]
    pub skip: usize,
    #[serde(default)]
    pub limit: usize,
}

impl From<TodoListBody> for TodoPage {
    fn from(body: TodoListBody) -> Self {
        match body {
            TodoListBody::Page(page) => page,
            TodoListBody::Bare(todos) => TodoPage {
                total: todos.len(),
                skip: 0,
                limit: todos.len(),
                todos,
            },
        }
    }
}

/// `POST /auth/login` request body
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
    #[serde(rename = "expiresInMins")]
    pub expires_in_mins: u32,
}

/// `POST /auth/login` response. Profile fields beyond the tokens are kept verbatim.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    #[serde(rename = "accessToken")]
    pub access_token: String,
    #[serde(rename = "refreshToken", default)]
    pub refresh_token: String,
    #[serde(flatten)]
    pub profile: serde_json::Map<String, serde_json::Value>,
}
