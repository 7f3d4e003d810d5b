use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use tracing::info;

use super::{toast_err, DialogResult, Notifier, Prompter};
use crate::dto::interview_dto::{parse_rating, InterviewForm, ReschedulePayload};
use crate::error::Result;
use crate::models::interview::{
    Interview, InterviewListQuery, InterviewStats, InterviewStatus, ScheduledInterview,
};
use crate::models::user::User;
use crate::services::access_service::AccessService;
use crate::services::interview_service::InterviewService;

pub struct InterviewScheduler {
    interviews: InterviewService,
    directory: AccessService,
    notifier: Arc<dyn Notifier>,
    prompter: Arc<dyn Prompter>,
}

impl InterviewScheduler {
    pub fn new(
        interviews: InterviewService,
        directory: AccessService,
        notifier: Arc<dyn Notifier>,
        prompter: Arc<dyn Prompter>,
    ) -> Self {
        Self {
            interviews,
            directory,
            notifier,
            prompter,
        }
    }

    /// Users that can be picked as interviewers.
    pub async fn interviewer_directory(&self) -> Result<Vec<User>> {
        let users = toast_err(&*self.notifier, self.directory.users().await)?;
        Ok(users.into_iter().filter(|u| u.is_active).collect())
    }

    /// Validates the form locally; nothing is sent if a check fails.
    pub async fn schedule(&self, form: &InterviewForm) -> Result<ScheduledInterview> {
        let payload = toast_err(&*self.notifier, form.to_payload())?;
        let scheduled = toast_err(&*self.notifier, self.interviews.schedule(&payload).await)?;
        info!(
            application = %payload.application_id,
            date = %payload.scheduled_date,
            "interview scheduled"
        );
        if scheduled.meeting_link_generated {
            self.notifier
                .success("Interview scheduled successfully. Google Meet link generated.");
        } else {
            self.notifier.success("Interview scheduled successfully");
        }
        Ok(scheduled)
    }

    pub async fn list(&self, query: &InterviewListQuery) -> Result<Vec<Interview>> {
        toast_err(&*self.notifier, self.interviews.list(query).await)
    }

    pub async fn stats(&self) -> Result<InterviewStats> {
        toast_err(&*self.notifier, self.interviews.stats().await)
    }

    pub async fn reschedule(&self, id: &str, date: NaiveDate, time: NaiveTime) -> Result<()> {
        let payload = ReschedulePayload {
            scheduled_date: date.format("%Y-%m-%d").to_string(),
            scheduled_time: time.format("%H:%M").to_string(),
            status: InterviewStatus::Rescheduled,
        };
        toast_err(&*self.notifier, self.interviews.reschedule(id, &payload).await)?;
        self.notifier.success("Interview rescheduled successfully");
        Ok(())
    }

    /// Asks for a reason first. Returns `false` if the dialog was dismissed or
    /// left blank.
    pub async fn cancel(&self, id: &str) -> Result<bool> {
        let reason = match self.prompter.prompt("Please provide a reason for cancellation:")? {
            DialogResult::Confirmed(reason) if !reason.trim().is_empty() => reason,
            DialogResult::Confirmed(_) => return Ok(false),
            DialogResult::Dismissed => {
                self.notifier
                    .info("Interview was not cancelled: a reason is required");
                return Ok(false);
            }
        };
        toast_err(&*self.notifier, self.interviews.cancel(id, reason.trim()).await)?;
        self.notifier.success("Interview cancelled successfully");
        Ok(true)
    }

    /// Asks for feedback and a 1 to 5 rating before marking it completed.
    pub async fn complete(&self, id: &str) -> Result<bool> {
        let not_completed = "Interview was not completed: feedback and a rating are required";
        let feedback = match self.prompter.prompt("Interview feedback:")? {
            DialogResult::Confirmed(feedback) => feedback,
            DialogResult::Dismissed => {
                self.notifier.info(not_completed);
                return Ok(false);
            }
        };
        let raw_rating = match self.prompter.prompt("Rating (1-5):")? {
            DialogResult::Confirmed(rating) => rating,
            DialogResult::Dismissed => {
                self.notifier.info(not_completed);
                return Ok(false);
            }
        };
        let rating = toast_err(&*self.notifier, parse_rating(&raw_rating))?;
        toast_err(
            &*self.notifier,
            self.interviews.complete(id, feedback.trim(), rating).await,
        )?;
        self.notifier.success("Interview marked as completed");
        Ok(true)
    }

    pub async fn remind(&self, id: &str) -> Result<()> {
        let message = toast_err(&*self.notifier, self.interviews.remind(id).await)?;
        self.notifier.success(
            message
                .as_deref()
                .unwrap_or("Reminder sent to candidate and interviewers"),
        );
        Ok(())
    }
}
