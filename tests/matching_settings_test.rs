mod common;

use axum::http::Method;
use common::{MockBackend, MockPrompter};
use recruitment_admin::{
    models::{
        matching::MatchingFilter,
        settings::{AiConfig, EmailConfig},
    },
    views::{matching_results::ExportFormat, notifier::ToastLevel, DialogResult},
};
use serde_json::json;

fn result_json(id: &str, overall: f64, shortlisted: bool) -> serde_json::Value {
    json!({
        "_id": id,
        "application": {"_id": format!("a-{}", id), "fullName": "Rustam, Jr.", "email": "rustam@example.com"},
        "position": {"_id": "p1", "title": "Backend Engineer"},
        "scores": {"overall": overall, "skills": 80, "experience": 70.5, "education": 60, "relevance": 90},
        "strengths": ["Rust", "Tokio"],
        "weaknesses": [],
        "isShortlisted": shortlisted
    })
}

#[tokio::test]
async fn match_now_triggers_run_and_refetches_once() {
    let backend = MockBackend::start().await;
    backend.ok(
        Method::POST,
        "ai-matching/match-all",
        json!({"totalProcessed": 4, "shortlistedCount": 1}),
    );
    backend.ok(
        Method::GET,
        "ai-matching/results",
        json!({"results": [result_json("m1", 88.0, true)]}),
    );
    let (app, notifier) = backend.app();
    let mut view = app.matching_results();

    view.match_now(None).await.unwrap();

    assert_eq!(backend.requests_to(Method::POST, "ai-matching/match-all").len(), 1);
    assert_eq!(backend.requests_to(Method::GET, "ai-matching/results").len(), 1);
    assert_eq!(view.visible().len(), 1);
    assert_eq!(
        notifier.messages(ToastLevel::Success),
        vec!["AI matching completed: 4 application(s) processed, 1 shortlisted".to_string()]
    );
}

#[tokio::test]
async fn csv_export_writes_filtered_rows() {
    let backend = MockBackend::start().await;
    backend.ok(
        Method::GET,
        "ai-matching/results",
        json!([result_json("m1", 88.0, true), result_json("m2", 41.5, false)]),
    );
    let (app, notifier) = backend.app();
    let mut view = app.matching_results();
    view.load(MatchingFilter {
        min_score: Some(50.0),
        ..MatchingFilter::default()
    })
    .await
    .unwrap();
    let dir = tempfile::tempdir().unwrap();

    let path = view.export(ExportFormat::Csv, dir.path()).await.unwrap();

    let name = path.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("ai-matching-results-") && name.ends_with(".csv"));
    let written = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("Candidate Name,Email,Position,Overall Score"));
    assert!(lines[1].starts_with("\"Rustam, Jr.\",rustam@example.com,Backend Engineer,88,80,70.5"));
    assert!(lines[1].contains(",Yes,Rust; Tokio,"));
    assert!(notifier
        .messages(ToastLevel::Success)
        .iter()
        .any(|m| m.starts_with("Exported 1 result(s) to ")));
}

#[tokio::test]
async fn ai_weights_must_sum_to_hundred() {
    let backend = MockBackend::start().await;
    let (app, notifier) = backend.app();
    let mut config = AiConfig::default();
    config.matching_criteria.skills = 50;
    config.matching_criteria.experience = 30;
    config.matching_criteria.education = 10;
    config.matching_criteria.relevance = 5;

    assert!(app.settings().save_ai_config(&config).await.is_err());
    assert!(backend.requests().is_empty());
    assert_eq!(
        notifier.messages(ToastLevel::Error),
        vec!["Matching criteria weights must sum to 100 (currently 95)".to_string()]
    );
}

#[tokio::test]
async fn failed_smtp_check_is_an_error_toast() {
    let backend = MockBackend::start().await;
    backend.on(
        Method::POST,
        "email-config/test-connection",
        axum::http::StatusCode::OK,
        json!({"success": false, "message": "Invalid login: 535 Authentication failed"}),
    );
    let (app, notifier) = backend.app();
    let config: EmailConfig = serde_json::from_value(json!({
        "host": "smtp.example.com",
        "port": 587,
        "username": "hr@example.com",
        "password": "secret",
        "fromEmail": "hr@example.com"
    }))
    .unwrap();

    let check = app.settings().test_email_connection(&config).await.unwrap();

    assert!(!check.success);
    assert_eq!(
        notifier.last(),
        Some((
            ToastLevel::Error,
            "Invalid login: 535 Authentication failed".to_string()
        ))
    );
}

#[tokio::test]
async fn home_reset_requires_confirmation() {
    let backend = MockBackend::start().await;
    let mut prompter = MockPrompter::new();
    prompter
        .expect_confirm()
        .times(1)
        .returning(|_| Ok(DialogResult::Dismissed));
    let (app, _, _) = backend.app_with(Some("t"), prompter);

    assert!(app.settings().reset_home_content().await.unwrap().is_none());
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn ai_check_without_inner_flag_uses_envelope_success() {
    let backend = MockBackend::start().await;
    backend.on(
        Method::POST,
        "ai-config/test",
        axum::http::StatusCode::OK,
        json!({
            "success": true,
            "message": "AI connection successful",
            "data": {"model": "gpt-4o-mini"}
        }),
    );
    let (app, notifier) = backend.app();

    let check = app.settings().test_ai().await.unwrap();

    assert!(check.success);
    assert!(notifier.messages(ToastLevel::Error).is_empty());
    assert_eq!(
        notifier.last(),
        Some((ToastLevel::Success, "AI connection successful".to_string()))
    );
}

#[tokio::test]
async fn oversized_weight_cannot_wrap_into_a_valid_total() {
    let backend = MockBackend::start().await;
    let (app, notifier) = backend.app();
    let mut config = AiConfig::default();
    config.matching_criteria.skills = u32::MAX;
    config.matching_criteria.experience = 101;
    config.matching_criteria.education = 0;
    config.matching_criteria.relevance = 0;

    assert!(app.settings().save_ai_config(&config).await.is_err());
    assert!(backend.requests().is_empty());
    assert_eq!(
        notifier.messages(ToastLevel::Error),
        vec!["Each matching criteria weight must be between 0 and 100".to_string()]
    );
}
