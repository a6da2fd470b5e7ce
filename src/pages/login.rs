//! Login Page
//!
//! Username/password form. Errors stay inline on the form; the password is
//! kept so the user can fix a typo in the username.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions;
use crate::context::use_app_context;

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_app_context();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let loading = RwSignal::new(false);
    let submitted = RwSignal::new(false);

    let missing = move |field: RwSignal<String>| submitted.get() && field.with(|v| v.trim().is_empty());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        submitted.set(true);
        let user = username.get_untracked();
        let pass = password.get_untracked();
        if user.trim().is_empty() || pass.is_empty() || loading.get_untracked() {
            return;
        }

        let auth = ctx.auth_api();
        let session = ctx.session.clone();
        loading.set(true);
        error.set(None);

        spawn_local(async move {
            // On success the route guard moves us on to /todos
            if let Err(message) = actions::sign_in(&auth, &session, &user, &pass).await {
                error.set(Some(message.to_string()));
            }
            loading.set(false);
        });
    };

    view! {
        <div class="login-page">
            <form class="login-card" on:submit=on_submit>
                <h1>"Sign in"</h1>

                <label for="username">"Username"</label>
                <input
                    id="username"
                    type="text"
                    autocomplete="username"
                    prop:value=move || username.get()
                    on:input=move |ev| username.set(event_target_value(&ev))
                />
                <Show when=move || missing(username)>
                    <p class="field-error">"Username is required"</p>
                </Show>

                <label for="password">"Password"</label>
                <input
                    id="password"
                    type="password"
                    autocomplete="current-password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <Show when=move || missing(password)>
                    <p class="field-error">"Password is required"</p>
                </Show>

                {move || error.get().map(|msg| view! { <p class="login-error">{msg}</p> })}

                <button type="submit" class="primary-btn" disabled=move || loading.get()>
                    {move || if loading.get() { "Signing in..." } else { "Sign in" }}
                </button>
            </form>
        </div>
    }
}
