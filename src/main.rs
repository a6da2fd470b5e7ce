//! Todo Board Frontend Entry Point

mod actions;
mod api;
mod app;
mod board;
mod components;
mod config;
mod context;
mod dialogs;
mod error;
mod guards;
mod models;
mod pages;
mod session;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::from_build_env();
    if console_logger::init(config.log_level).is_err() {
        web_sys::console::warn_1(&"[APP] Logger already installed".into());
    }
    log::info!(target: "app", "Todos API at {}", config.todos_api_url);

    mount_to_body(move || view! { <App config=config.clone() /> });
}
