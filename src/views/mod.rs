//! Screen controllers. Each one drives a service, reports the outcome through
//! a [`Notifier`] and asks through a [`Prompter`] before destructive actions.

pub mod access_control;
pub mod application_list;
pub mod dialog;
pub mod interview_scheduler;
pub mod matching_results;
pub mod notifier;
pub mod poller;
pub mod position_manager;
pub mod selected_candidates;
pub mod settings;

pub use dialog::{DialogResult, Prompter};
pub use notifier::Notifier;
pub use poller::Poller;

use crate::error::Result;

/// Turns a failure into an error toast and hands it back unchanged.
pub(crate) fn toast_err<T>(notifier: &dyn Notifier, result: Result<T>) -> Result<T> {
    if let Err(err) = &result {
        notifier.error(&err.user_message());
    }
    result
}
