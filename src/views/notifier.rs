use std::sync::Mutex;

use tracing::{error, info};

/// Short user-facing feedback shown after an action.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
    fn info(&self, message: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
    Info,
}

/// Prints toasts to the terminal and mirrors them into the log.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn success(&self, message: &str) {
        info!(toast = "success", "{}", message);
        println!("✔ {}", message);
    }

    fn error(&self, message: &str) {
        error!(toast = "error", "{}", message);
        eprintln!("✘ {}", message);
    }

    fn info(&self, message: &str) {
        info!(toast = "info", "{}", message);
        println!("• {}", message);
    }
}

/// Keeps every toast in memory, for embedding and for tests.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    toasts: Mutex<Vec<(ToastLevel, String)>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toasts(&self) -> Vec<(ToastLevel, String)> {
        self.toasts.lock().map(|t| t.clone()).unwrap_or_default()
    }

    pub fn last(&self) -> Option<(ToastLevel, String)> {
        self.toasts().pop()
    }

    pub fn messages(&self, level: ToastLevel) -> Vec<String> {
        self.toasts()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }

    fn push(&self, level: ToastLevel, message: &str) {
        if let Ok(mut toasts) = self.toasts.lock() {
            toasts.push((level, message.to_string()));
        }
    }
}

impl Notifier for MemoryNotifier {
    fn success(&self, message: &str) {
        self.push(ToastLevel::Success, message);
    }

    fn error(&self, message: &str) {
        self.push(ToastLevel::Error, message);
    }

    fn info(&self, message: &str) {
        self.push(ToastLevel::Info, message);
    }
}
