//! Application Context
//!
//! Shared services provided via Leptos Context API.

use std::sync::Arc;

use leptos::prelude::*;

use crate::api::{AuthClient, TodosClient};
use crate::config::AppConfig;
use crate::dialogs::Dialogs;
use crate::session::SessionContext;

/// App-wide services provided via context
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<AppConfig>,
    /// Login state; the only source of the "is authenticated" predicate
    pub session: SessionContext,
    /// Alert/confirm/toast host
    pub dialogs: Dialogs,
}

impl AppContext {
    pub fn new(config: AppConfig, session: SessionContext, dialogs: Dialogs) -> Self {
        Self {
            config: Arc::new(config),
            session,
            dialogs,
        }
    }

    /// Todos client carrying the current access token
    pub fn todos_api(&self) -> TodosClient {
        TodosClient::new(self.config.as_ref().clone(), self.session.access_token_untracked())
    }

    pub fn auth_api(&self) -> AuthClient {
        AuthClient::new(self.config.as_ref().clone())
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
