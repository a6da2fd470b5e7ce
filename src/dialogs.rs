//! Dialog State
//!
//! Alert, confirm and toast state shared by every page. Rendering lives in
//! `components::{AlertDialog, ConfirmDialog, Toast}`; this module only holds
//! what is open and what to do when it closes.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

/// Fixed user-facing messages, one per operation
pub mod messages {
    pub const UPDATE_FAILED: &str = "Failed to update task status. Please try again.";
    pub const ADD_FAILED: &str = "Failed to add the task. Please try again.";
    pub const DELETE_FAILED: &str = "Failed to delete the task. Please try again.";
    pub const ADD_SUCCEEDED: &str = "Task added successfully!";
    pub const DELETE_SUCCEEDED: &str = "Task deleted successfully!";
    pub const LOGIN_FAILED: &str = "Invalid username or password";
    pub const LOAD_FAILED: &str = "Could not load tasks.";
    pub const DETAIL_LOAD_FAILED: &str = "Task not found or could not be loaded.";
}

const TOAST_MS: u32 = 2_500;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlertKind {
    Error,
    Success,
}

impl AlertKind {
    pub fn icon(self) -> &'static str {
        match self {
            AlertKind::Error => "⛔",
            AlertKind::Success => "✔",
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            AlertKind::Error => "alert-error",
            AlertKind::Success => "alert-success",
        }
    }
}

/// Blocking alert with a single dismiss button
#[derive(Clone, Debug, PartialEq)]
pub struct AlertSpec {
    pub title: String,
    pub message: String,
    pub kind: AlertKind,
    pub button_text: String,
}

impl AlertSpec {
    pub fn new(kind: AlertKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            kind,
            button_text: "OK".to_string(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(AlertKind::Error, "Error", message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(AlertKind::Success, "Success", message)
    }
}

/// Yes/no question
#[derive(Clone, Debug, PartialEq)]
pub struct ConfirmSpec {
    pub title: String,
    pub message: String,
    pub confirm_text: String,
    pub cancel_text: String,
}

impl ConfirmSpec {
    pub fn delete_task() -> Self {
        Self {
            title: "Delete Task".to_string(),
            message: "Are you sure you want to delete this task? This action cannot be undone.".to_string(),
            confirm_text: "Delete".to_string(),
            cancel_text: "Cancel".to_string(),
        }
    }
}

/// What the user should see after an operation
#[derive(Clone, Debug, PartialEq)]
pub enum Feedback {
    Silent,
    /// Transient, non-blocking notice
    Toast(String),
    Alert(AlertSpec),
}

impl Feedback {
    pub fn error(message: &str) -> Self {
        Feedback::Alert(AlertSpec::error(message))
    }

    pub fn success(message: &str) -> Self {
        Feedback::Alert(AlertSpec::success(message))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Feedback::Alert(spec) if spec.kind == AlertKind::Error)
    }
}

/// App-wide dialog host, provided via context
#[derive(Clone, Copy)]
pub struct Dialogs {
    pub alert: RwSignal<Option<AlertSpec>>,
    pub confirm: RwSignal<Option<ConfirmSpec>>,
    on_confirm: StoredValue<Option<Callback<bool>>>,
    /// (sequence, text); the sequence keeps an old timer from closing a newer toast
    pub toast: RwSignal<Option<(u32, String)>>,
}

impl Dialogs {
    pub fn new() -> Self {
        Self {
            alert: RwSignal::new(None),
            confirm: RwSignal::new(None),
            on_confirm: StoredValue::new(None),
            toast: RwSignal::new(None),
        }
    }

    pub fn show_alert(&self, spec: AlertSpec) {
        self.alert.set(Some(spec));
    }

    pub fn close_alert(&self) {
        self.alert.set(None);
    }

    /// Ask a question; `on_close` receives the answer once the dialog closes
    pub fn ask(&self, spec: ConfirmSpec, on_close: impl Fn(bool) + Send + Sync + 'static) {
        self.on_confirm.set_value(Some(Callback::new(on_close)));
        self.confirm.set(Some(spec));
    }

    /// Close the confirm dialog with the user's answer
    pub fn answer(&self, confirmed: bool) {
        self.confirm.set(None);
        let mut pending = None;
        self.on_confirm.update_value(|cb| pending = cb.take());
        if let Some(cb) = pending {
            cb.run(confirmed);
        }
    }

    pub fn show_toast(&self, text: String) {
        let seq = self.toast.with_untracked(|t| t.as_ref().map_or(0, |(n, _)| n.wrapping_add(1)));
        self.toast.set(Some((seq, text)));
        let toast = self.toast;
        Timeout::new(TOAST_MS, move || {
            if toast.with_untracked(|t| matches!(t, Some((n, _)) if *n == seq)) {
                toast.set(None);
            }
        })
        .forget();
    }

    /// Route operation feedback to the right surface
    pub fn show(&self, feedback: Feedback) {
        match feedback {
            Feedback::Silent => {}
            Feedback::Toast(text) => self.show_toast(text),
            Feedback::Alert(spec) => self.show_alert(spec),
        }
    }
}

impl Default for Dialogs {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_defaults() {
        let spec = AlertSpec::error(messages::ADD_FAILED);
        assert_eq!(spec.title, "Error");
        assert_eq!(spec.button_text, "OK");
        assert_eq!(spec.kind.class(), "alert-error");
    }

    #[test]
    fn test_feedback_is_error() {
        assert!(Feedback::error(messages::DELETE_FAILED).is_error());
        assert!(!Feedback::success(messages::DELETE_SUCCEEDED).is_error());
        assert!(!Feedback::Toast("done".to_string()).is_error());
        assert!(!Feedback::Silent.is_error());
    }
}
