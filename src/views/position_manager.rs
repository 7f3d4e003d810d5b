use std::sync::Arc;

use tracing::info;

use super::{toast_err, DialogResult, Notifier, Prompter};
use crate::dto::position_dto::PositionForm;
use crate::error::Result;
use crate::models::position::{Position, PositionFilter};
use crate::services::position_service::{DeleteOutcome, PositionService};
use crate::utils::validation::validate;

pub const DELETE_CONFIRM_MESSAGE: &str = "Are you sure you want to delete this position?";

pub struct PositionManager {
    service: PositionService,
    notifier: Arc<dyn Notifier>,
    prompter: Arc<dyn Prompter>,
    filter: PositionFilter,
    positions: Vec<Position>,
}

impl PositionManager {
    pub fn new(service: PositionService, notifier: Arc<dyn Notifier>, prompter: Arc<dyn Prompter>) -> Self {
        Self {
            service,
            notifier,
            prompter,
            filter: PositionFilter::All,
            positions: Vec::new(),
        }
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn filter(&self) -> PositionFilter {
        self.filter
    }

    pub async fn load(&mut self, filter: PositionFilter) -> Result<&[Position]> {
        self.filter = filter;
        self.refresh().await?;
        Ok(&self.positions)
    }

    /// Re-reads the list with the current filter. The filter is applied again
    /// locally in case the backend ignores the `status` parameter.
    pub async fn refresh(&mut self) -> Result<()> {
        let fetched = toast_err(&*self.notifier, self.service.list(self.filter.status()).await)?;
        self.positions = fetched
            .into_iter()
            .filter(|p| self.filter.matches(p))
            .collect();
        Ok(())
    }

    pub async fn create(&mut self, form: PositionForm) -> Result<()> {
        let form = self.checked(form)?;
        toast_err(&*self.notifier, self.service.create(&form).await)?;
        info!(title = %form.title, "position created");
        self.notifier.success("Position created successfully");
        self.refresh().await
    }

    pub async fn update(&mut self, id: &str, form: PositionForm) -> Result<()> {
        let form = self.checked(form)?;
        toast_err(&*self.notifier, self.service.update(id, &form).await)?;
        self.notifier.success("Position updated successfully");
        self.refresh().await
    }

    pub async fn toggle_status(&mut self, id: &str) -> Result<()> {
        let current = match self.positions.iter().find(|p| p.id == id) {
            Some(position) => position.status,
            None => toast_err(&*self.notifier, self.service.get_by_id(id).await)?.status,
        };
        let next = current.toggled();
        toast_err(&*self.notifier, self.service.set_status(id, next).await)?;
        self.notifier.success(&format!("Position marked as {}", next));
        self.refresh().await
    }

    /// Returns `false` when the user backed out at either confirmation.
    pub async fn delete(&mut self, id: &str) -> Result<bool> {
        if let DialogResult::Dismissed = self.prompter.confirm(DELETE_CONFIRM_MESSAGE)? {
            return Ok(false);
        }
        match toast_err(&*self.notifier, self.service.delete(id).await)? {
            DeleteOutcome::Deleted => {
                self.notifier.success("Position deleted successfully");
            }
            DeleteOutcome::HasApplications { count, message } => {
                let question = format!(
                    "{} This position has {} application(s). Delete it together with all of its applications?",
                    message, count
                );
                if let DialogResult::Dismissed = self.prompter.confirm(&question)? {
                    self.notifier.info("Position was not deleted");
                    return Ok(false);
                }
                toast_err(&*self.notifier, self.service.force_delete(id).await)?;
                info!(id, count, "position force-deleted with its applications");
                self.notifier
                    .success("Position and its applications deleted successfully");
            }
        }
        self.refresh().await?;
        Ok(true)
    }

    fn checked(&self, form: PositionForm) -> Result<PositionForm> {
        let form = form.normalized();
        if let Err(err) = validate(&form) {
            self.notifier.error(&err.user_message());
            return Err(err);
        }
        Ok(form)
    }
}
