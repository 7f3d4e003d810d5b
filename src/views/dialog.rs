use dialoguer::{Confirm, Input};

use crate::error::{Error, Result};

/// Answer of a confirm or prompt dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogResult<T> {
    Confirmed(T),
    Dismissed,
}

impl<T> DialogResult<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            DialogResult::Confirmed(value) => Some(value),
            DialogResult::Dismissed => None,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, DialogResult::Confirmed(_))
    }
}

/// Blocking questions a view may ask before it acts.
pub trait Prompter: Send + Sync {
    fn confirm(&self, message: &str) -> Result<DialogResult<()>>;

    /// Free-text answer. An empty answer is returned as `Confirmed("")`;
    /// callers decide whether that is acceptable.
    fn prompt(&self, message: &str) -> Result<DialogResult<String>>;
}

/// Terminal dialogs.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn confirm(&self, message: &str) -> Result<DialogResult<()>> {
        let answer = Confirm::new()
            .with_prompt(message)
            .default(false)
            .interact_opt()
            .map_err(dialog_error)?;
        Ok(match answer {
            Some(true) => DialogResult::Confirmed(()),
            _ => DialogResult::Dismissed,
        })
    }

    fn prompt(&self, message: &str) -> Result<DialogResult<String>> {
        let answer: String = Input::new()
            .with_prompt(message)
            .allow_empty(true)
            .interact_text()
            .map_err(dialog_error)?;
        Ok(DialogResult::Confirmed(answer))
    }
}

/// Answers every dialog the same way; used for `--yes` runs.
#[derive(Debug, Clone, Copy)]
pub struct AssumeYes;

impl Prompter for AssumeYes {
    fn confirm(&self, _message: &str) -> Result<DialogResult<()>> {
        Ok(DialogResult::Confirmed(()))
    }

    fn prompt(&self, _message: &str) -> Result<DialogResult<String>> {
        Ok(DialogResult::Dismissed)
    }
}

fn dialog_error(err: dialoguer::Error) -> Error {
    Error::Io(std::io::Error::new(std::io::ErrorKind::Other, err.to_string()))
}
