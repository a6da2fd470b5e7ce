//! Todo Board App
//!
//! Root component: services in context, routes behind guards, dialog host.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;

use crate::components::{AlertDialog, ConfirmDialog, Navbar, Toast};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::dialogs::Dialogs;
use crate::guards::{Guarded, LOGIN_PATH};
use crate::pages::{LoginPage, TodoDetailPage, TodosPage};
use crate::session::{KeyValueStore, LocalStorageStore, MemoryStore, SessionContext};

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let store: Arc<dyn KeyValueStore> = if LocalStorageStore::is_available() {
        Arc::new(LocalStorageStore)
    } else {
        log::warn!(target: "app", "localStorage unavailable, session will not survive a reload");
        Arc::new(MemoryStore::new())
    };
    let session = SessionContext::restore(store);

    // Provide services to all children
    provide_context(AppContext::new(config, session, Dialogs::new()));

    view! {
        <Router>
            <Navbar />
            <main class="main-content">
                <Routes fallback=|| view! { <Redirect path=LOGIN_PATH /> }>
                    <Route path=path!("/") view=|| view! { <Redirect path=LOGIN_PATH /> } />
                    <Route path=path!("/login") view=|| view! { <Guarded><LoginPage /></Guarded> } />
                    <Route path=path!("/todos") view=|| view! { <Guarded><TodosPage /></Guarded> } />
                    <Route path=path!("/todos/:id") view=|| view! { <Guarded><TodoDetailPage /></Guarded> } />
                </Routes>
            </main>

            // Dialog host
            <AlertDialog />
            <ConfirmDialog />
            <Toast />
        </Router>
    }
}
