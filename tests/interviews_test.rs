mod common;

use axum::http::Method;
use chrono::{NaiveDate, NaiveTime};
use common::{MockBackend, MockPrompter};
use recruitment_admin::{
    dto::interview_dto::InterviewForm,
    views::{notifier::ToastLevel, DialogResult},
};
use serde_json::json;

fn form_with_slot() -> InterviewForm {
    let mut form = InterviewForm::new("a1");
    form.date = NaiveDate::from_ymd_opt(2026, 11, 3);
    form.time = NaiveTime::from_hms_opt(14, 30, 0);
    form
}

#[tokio::test]
async fn scheduling_without_interviewers_sends_nothing() {
    let backend = MockBackend::start().await;
    let (app, notifier) = backend.app();

    let result = app.interview_scheduler().schedule(&form_with_slot()).await;

    assert!(result.is_err());
    assert!(backend.requests_to(Method::POST, "interviews").is_empty());
    assert_eq!(
        notifier.messages(ToastLevel::Error),
        vec!["Please add at least one interviewer".to_string()]
    );
}

#[tokio::test]
async fn scheduling_without_date_sends_nothing() {
    let backend = MockBackend::start().await;
    let (app, notifier) = backend.app();
    let mut form = InterviewForm::new("a1");
    form.add_custom_interviewer("Kamola", "kamola@corp.io").unwrap();

    assert!(app.interview_scheduler().schedule(&form).await.is_err());
    assert!(backend.requests().is_empty());
    assert_eq!(
        notifier.messages(ToastLevel::Error),
        vec!["Please select date and time".to_string()]
    );
}

#[tokio::test]
async fn scheduled_interview_reports_generated_meet_link() {
    let backend = MockBackend::start().await;
    backend.on(
        Method::POST,
        "interviews",
        axum::http::StatusCode::CREATED,
        json!({
            "success": true,
            "meetLinkGenerated": true,
            "data": {
                "_id": "i1",
                "scheduledDate": "2026-11-03",
                "scheduledTime": "14:30",
                "meetingLink": "https://meet.google.com/abc-defg-hij",
                "status": "scheduled"
            }
        }),
    );
    let (app, notifier) = backend.app();
    let mut form = form_with_slot();
    form.add_custom_interviewer("Kamola", "kamola@corp.io").unwrap();

    let scheduled = app.interview_scheduler().schedule(&form).await.unwrap();

    assert!(scheduled.meeting_link_generated);
    let body = backend.requests_to(Method::POST, "interviews")[0].json();
    assert_eq!(body["applicationId"], "a1");
    assert_eq!(body["scheduledDate"], "2026-11-03");
    assert_eq!(body["scheduledTime"], "14:30");
    assert_eq!(body["interviewers"][0]["email"], "kamola@corp.io");
    assert_eq!(
        notifier.last(),
        Some((
            ToastLevel::Success,
            "Interview scheduled successfully. Google Meet link generated.".to_string()
        ))
    );
}

#[tokio::test]
async fn cancel_sends_trimmed_reason() {
    let backend = MockBackend::start().await;
    backend.ok(Method::PUT, "interviews/i1/cancel", json!({"_id": "i1", "status": "cancelled"}));
    let mut prompter = MockPrompter::new();
    prompter
        .expect_prompt()
        .times(1)
        .returning(|_| Ok(DialogResult::Confirmed("  Candidate withdrew ".to_string())));
    let (app, notifier, _) = backend.app_with(Some("t"), prompter);

    assert!(app.interview_scheduler().cancel("i1").await.unwrap());

    let body = backend.requests_to(Method::PUT, "interviews/i1/cancel")[0].json();
    assert_eq!(body["reason"], "Candidate withdrew");
    assert_eq!(
        notifier.last(),
        Some((ToastLevel::Success, "Interview cancelled successfully".to_string()))
    );
}

#[tokio::test]
async fn blank_cancellation_reason_aborts() {
    let backend = MockBackend::start().await;
    let mut prompter = MockPrompter::new();
    prompter
        .expect_prompt()
        .returning(|_| Ok(DialogResult::Confirmed("   ".to_string())));
    let (app, _, _) = backend.app_with(Some("t"), prompter);

    assert!(!app.interview_scheduler().cancel("i1").await.unwrap());
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn out_of_range_rating_blocks_completion() {
    let backend = MockBackend::start().await;
    let mut prompter = MockPrompter::new();
    let mut answers = vec!["9".to_string(), "Strong systems design".to_string()];
    prompter
        .expect_prompt()
        .times(2)
        .returning(move |_| Ok(DialogResult::Confirmed(answers.pop().unwrap_or_default())));
    let (app, notifier, _) = backend.app_with(Some("t"), prompter);

    assert!(app.interview_scheduler().complete("i1").await.is_err());
    assert!(backend.requests().is_empty());
    assert_eq!(notifier.messages(ToastLevel::Error).len(), 1);
}

#[tokio::test]
async fn dismissed_cancellation_reason_explains_why() {
    let backend = MockBackend::start().await;
    let mut prompter = MockPrompter::new();
    prompter
        .expect_prompt()
        .times(1)
        .returning(|_| Ok(DialogResult::Dismissed));
    let (app, notifier, _) = backend.app_with(Some("t"), prompter);

    assert!(!app.interview_scheduler().cancel("i1").await.unwrap());
    assert!(backend.requests().is_empty());
    assert_eq!(
        notifier.last(),
        Some((
            ToastLevel::Info,
            "Interview was not cancelled: a reason is required".to_string()
        ))
    );
}

#[tokio::test]
async fn dismissed_feedback_leaves_interview_open() {
    let backend = MockBackend::start().await;
    let mut prompter = MockPrompter::new();
    prompter
        .expect_prompt()
        .times(1)
        .returning(|_| Ok(DialogResult::Dismissed));
    let (app, notifier, _) = backend.app_with(Some("t"), prompter);

    assert!(!app.interview_scheduler().complete("i1").await.unwrap());
    assert!(backend.requests().is_empty());
    assert_eq!(
        notifier.messages(ToastLevel::Info),
        vec!["Interview was not completed: feedback and a rating are required".to_string()]
    );
}
