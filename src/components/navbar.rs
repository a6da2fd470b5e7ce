//! Navbar Component
//!
//! Top bar with the signed-in user's name, a link back to the list, and logout.

use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::context::use_app_context;
use crate::guards::{shows_navbar, TODOS_PATH};

/// Navigation bar, hidden on the login screen
#[component]
pub fn Navbar() -> impl IntoView {
    let ctx = use_app_context();
    let location = use_location();

    let visible = move || location.pathname.with(|path| shows_navbar(path));

    let session = ctx.session.clone();
    let user_name = move || session.display_name().unwrap_or_else(|| "User".to_string());

    // The route guard redirects to /login once the session is gone
    let logout = move |_| ctx.session.end();

    view! {
        <Show when=visible>
            <nav class="navbar">
                <a href=TODOS_PATH class="navbar-brand">"Todos"</a>
                <span class="navbar-spacer" />
                <span class="navbar-user" title="Signed in">{user_name.clone()}</span>
                <button class="navbar-logout" title="Logout" on:click=logout.clone()>
                    "Logout"
                </button>
            </nav>
        </Show>
    }
}
