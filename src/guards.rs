//! Route Guards
//!
//! Which page a visitor may see given whether they are signed in.

use leptos::prelude::*;
use leptos_router::components::Redirect;
use leptos_router::hooks::use_location;

use crate::context::use_app_context;

pub const LOGIN_PATH: &str = "/login";
pub const TODOS_PATH: &str = "/todos";

pub fn todo_path(id: &str) -> String {
    format!("{}/{}", TODOS_PATH, crate::api::encode_path_segment(id))
}

/// Known routes
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppRoute {
    Root,
    Login,
    Todos,
    TodoDetail(String),
    Unknown,
}

impl AppRoute {
    pub fn parse(path: &str) -> Self {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => AppRoute::Root,
            ["login"] => AppRoute::Login,
            ["todos"] => AppRoute::Todos,
            ["todos", id] => AppRoute::TodoDetail(id.to_string()),
            _ => AppRoute::Unknown,
        }
    }
}

/// Guard decision
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Allow,
    Redirect(&'static str),
}

pub fn check(route: &AppRoute, authenticated: bool) -> Access {
    match route {
        AppRoute::Login if authenticated => Access::Redirect(TODOS_PATH),
        AppRoute::Login => Access::Allow,
        AppRoute::Todos | AppRoute::TodoDetail(_) if authenticated => Access::Allow,
        AppRoute::Todos | AppRoute::TodoDetail(_) => Access::Redirect(LOGIN_PATH),
        AppRoute::Root | AppRoute::Unknown => Access::Redirect(LOGIN_PATH),
    }
}

/// Navbar is hidden on the entry and login screens
pub fn shows_navbar(path: &str) -> bool {
    !matches!(AppRoute::parse(path), AppRoute::Root | AppRoute::Login)
}

/// Render `children` only if the guard allows the current location, else
/// redirect. Re-evaluates when the session changes, so logging in or out
/// on a guarded page moves the user along.
#[component]
pub fn Guarded(children: ChildrenFn) -> impl IntoView {
    let ctx = use_app_context();
    let location = use_location();
    move || {
        let route = AppRoute::parse(&location.pathname.get());
        match check(&route, ctx.session.is_authenticated()) {
            Access::Allow => children().into_any(),
            Access::Redirect(path) => {
                log::debug!(target: "guard", "{:?} -> {}", route, path);
                view! { <Redirect path=path /> }.into_any()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/", AppRoute::Root)]
    #[case("/login", AppRoute::Login)]
    #[case("/todos", AppRoute::Todos)]
    #[case("/todos/", AppRoute::Todos)]
    #[case("/todos/42", AppRoute::TodoDetail("42".to_string()))]
    #[case("/todos/42/edit", AppRoute::Unknown)]
    #[case("/settings", AppRoute::Unknown)]
    fn test_parse(#[case] path: &str, #[case] expected: AppRoute) {
        assert_eq!(AppRoute::parse(path), expected);
    }

    #[rstest]
    #[case(AppRoute::Root, false, Access::Redirect(LOGIN_PATH))]
    #[case(AppRoute::Root, true, Access::Redirect(LOGIN_PATH))]
    #[case(AppRoute::Login, false, Access::Allow)]
    #[case(AppRoute::Login, true, Access::Redirect(TODOS_PATH))]
    #[case(AppRoute::Todos, false, Access::Redirect(LOGIN_PATH))]
    #[case(AppRoute::Todos, true, Access::Allow)]
    #[case(AppRoute::TodoDetail("1".to_string()), false, Access::Redirect(LOGIN_PATH))]
    #[case(AppRoute::TodoDetail("1".to_string()), true, Access::Allow)]
    #[case(AppRoute::Unknown, true, Access::Redirect(LOGIN_PATH))]
    fn test_check(#[case] route: AppRoute, #[case] authenticated: bool, #[case] expected: Access) {
        assert_eq!(check(&route, authenticated), expected);
    }

    #[rstest]
    #[case("/", false)]
    #[case("/login", false)]
    #[case("/todos", true)]
    #[case("/todos/7", true)]
    fn test_shows_navbar(#[case] path: &str, #[case] expected: bool) {
        assert_eq!(shows_navbar(path), expected);
    }

    #[test]
    fn test_todo_path() {
        assert_eq!(todo_path("7"), "/todos/7");
    }
}
