//! App Configuration
//!
//! Endpoints and tunables, baked in at build time from the environment
//! (`TODOS_API_URL=... trunk build`). Unset variables fall back to the
//! public dummyjson deployment.

use log::LevelFilter;

const DEFAULT_TODOS_API_URL: &str = "https://dummyjson.com/todos";
const DEFAULT_AUTH_API_URL: &str = "https://dummyjson.com/auth/login";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL of the todo collection (`GET`/`POST` here, `/{id}` for the rest)
    pub todos_api_url: String,
    /// Login endpoint
    pub auth_api_url: String,
    /// Lifetime requested for issued access tokens
    pub token_expires_in_mins: u32,
    /// Owner recorded on newly added todos
    pub default_owner_id: u32,
    /// Minimum length of a new todo's text
    pub min_todo_len: usize,
    pub log_level: LevelFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            todos_api_url: DEFAULT_TODOS_API_URL.to_string(),
            auth_api_url: DEFAULT_AUTH_API_URL.to_string(),
            token_expires_in_mins: 30,
            default_owner_id: 26,
            min_todo_len: 3,
            log_level: LevelFilter::Info,
        }
    }
}

impl AppConfig {
    /// Build from compile-time environment variables
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("TODOS_API_URL"),
            option_env!("AUTH_API_URL"),
            option_env!("LOG_LEVEL"),
        )
    }

    fn from_values(todos: Option<&str>, auth: Option<&str>, log_level: Option<&str>) -> Self {
        let defaults = Self::default();
        Self {
            todos_api_url: non_empty(todos).map(trim_url).unwrap_or(defaults.todos_api_url),
            auth_api_url: non_empty(auth).map(trim_url).unwrap_or(defaults.auth_api_url),
            log_level: log_level.map(console_logger::parse_level).unwrap_or(defaults.log_level),
            ..defaults
        }
    }

    /// URL of a single todo
    pub fn todo_url(&self, id: &str) -> String {
        format!("{}/{}", self.todos_api_url, crate::api::encode_path_segment(id))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn trim_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_env_missing() {
        let config = AppConfig::from_values(None, Some("  "), None);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.token_expires_in_mins, 30);
        assert_eq!(config.min_todo_len, 3);
    }

    #[test]
    fn test_env_overrides_and_trailing_slash() {
        let config = AppConfig::from_values(Some("http://localhost:3000/todos/"), None, Some("debug"));
        assert_eq!(config.todos_api_url, "http://localhost:3000/todos");
        assert_eq!(config.auth_api_url, DEFAULT_AUTH_API_URL);
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_todo_url_encodes_id() {
        let config = AppConfig::default();
        assert_eq!(config.todo_url("12"), "https://dummyjson.com/todos/12");
        assert_eq!(config.todo_url("a b/c"), "https://dummyjson.com/todos/a%20b%2Fc");
    }
}
