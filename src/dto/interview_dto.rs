use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::models::interview::{InterviewType, Interviewer};
use crate::models::user::User;
use crate::utils::validation::is_valid_email;

pub const MISSING_SCHEDULE_MESSAGE: &str = "Please select date and time";
pub const MISSING_INTERVIEWER_MESSAGE: &str = "Please add at least one interviewer";
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address";

/// State of the "schedule interview" modal.
#[derive(Debug, Clone)]
pub struct InterviewForm {
    pub application_id: String,
    pub position_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub duration: u32,
    pub interview_type: InterviewType,
    pub location: Option<String>,
    pub notes: Option<String>,
    interviewers: Vec<Interviewer>,
}

impl InterviewForm {
    pub fn new(application_id: impl Into<String>) -> Self {
        Self {
            application_id: application_id.into(),
            position_id: None,
            date: None,
            time: None,
            duration: 60,
            interview_type: InterviewType::default(),
            location: None,
            notes: None,
            interviewers: Vec::new(),
        }
    }

    pub fn interviewers(&self) -> &[Interviewer] {
        &self.interviewers
    }

    /// Adds someone from the user directory. Returns false if already listed.
    pub fn add_directory_interviewer(&mut self, user: &User) -> bool {
        if self.contains_email(&user.email) {
            return false;
        }
        self.interviewers.push(user.as_interviewer());
        true
    }

    /// Adds an interviewer typed in by hand.
    pub fn add_custom_interviewer(&mut self, name: &str, email: &str) -> Result<()> {
        let name = name.trim();
        let email = email.trim();
        if name.is_empty() || email.is_empty() {
            return Err(Error::Validation(
                "Please enter interviewer name and email".to_string(),
            ));
        }
        if !is_valid_email(email) {
            return Err(Error::Validation(INVALID_EMAIL_MESSAGE.to_string()));
        }
        if self.contains_email(email) {
            return Err(Error::Validation(
                "This interviewer has already been added".to_string(),
            ));
        }
        self.interviewers.push(Interviewer {
            name: name.to_string(),
            email: email.to_string(),
            user_id: None,
        });
        Ok(())
    }

    pub fn remove_interviewer(&mut self, email: &str) -> bool {
        let before = self.interviewers.len();
        self.interviewers
            .retain(|i| !i.email.eq_ignore_ascii_case(email.trim()));
        before != self.interviewers.len()
    }

    fn contains_email(&self, email: &str) -> bool {
        self.interviewers
            .iter()
            .any(|i| i.email.eq_ignore_ascii_case(email.trim()))
    }

    /// Checks run before the request; the first failure is what the toast shows.
    pub fn to_payload(&self) -> Result<ScheduleInterviewPayload> {
        let (Some(date), Some(time)) = (self.date, self.time) else {
            return Err(Error::Validation(MISSING_SCHEDULE_MESSAGE.to_string()));
        };
        if self.interviewers.is_empty() {
            return Err(Error::Validation(MISSING_INTERVIEWER_MESSAGE.to_string()));
        }
        if self.duration == 0 {
            return Err(Error::Validation(
                "Duration must be at least 1 minute".to_string(),
            ));
        }
        Ok(ScheduleInterviewPayload {
            application_id: self.application_id.clone(),
            position_id: self.position_id.clone(),
            scheduled_date: date.format("%Y-%m-%d").to_string(),
            scheduled_time: time.format("%H:%M").to_string(),
            duration: self.duration,
            interview_type: self.interview_type,
            location: clean(&self.location),
            notes: clean(&self.notes),
            interviewers: self.interviewers.clone(),
        })
    }
}

fn clean(value: &Option<String>) -> Option<String> {
    value
        .as_ref()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleInterviewPayload {
    pub application_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_id: Option<String>,
    pub scheduled_date: String,
    pub scheduled_time: String,
    pub duration: u32,
    pub interview_type: InterviewType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub interviewers: Vec<Interviewer>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelInterviewPayload {
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteInterviewPayload {
    pub feedback: String,
    pub rating: u8,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReschedulePayload {
    pub scheduled_date: String,
    pub scheduled_time: String,
    pub status: crate::models::interview::InterviewStatus,
}

/// Rating prompt answer, accepted on a 1 to 5 scale.
pub fn parse_rating(raw: &str) -> Result<u8> {
    match raw.trim().parse::<u8>() {
        Ok(rating) if (1..=5).contains(&rating) => Ok(rating),
        _ => Err(Error::Validation(
            "Rating must be a number between 1 and 5".to_string(),
        )),
    }
}
