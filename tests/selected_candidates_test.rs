mod common;

use axum::http::{Method, StatusCode};
use chrono::NaiveDate;
use common::{MockBackend, MockPrompter};
use recruitment_admin::{
    dto::selection_dto::OfferLetterForm,
    models::selected_candidate::SelectedCandidateQuery,
    views::{notifier::ToastLevel, DialogResult},
};
use serde_json::json;

fn offer() -> OfferLetterForm {
    OfferLetterForm {
        designation: "Backend Engineer".into(),
        salary: "120000".into(),
        joining_date: NaiveDate::from_ymd_opt(2026, 12, 1).unwrap(),
        offer_valid_until: NaiveDate::from_ymd_opt(2026, 11, 20),
        reporting_manager: None,
        work_location: Some("Tashkent".into()),
        additional_notes: None,
    }
}

fn ids(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn bulk_offer_posts_once_per_candidate() {
    let backend = MockBackend::start().await;
    for id in ["s1", "s2", "s3"] {
        backend.ok(
            Method::POST,
            &format!("selected-candidates/{}/send-offer", id),
            json!({"_id": id, "status": "offer_sent"}),
        );
    }
    let (app, notifier) = backend.app();

    let sent = app
        .selected_candidates()
        .bulk_send_offers(&ids(&["s1", "s2", "s3"]), &offer())
        .await
        .unwrap();

    assert_eq!(sent, 3);
    for id in ["s1", "s2", "s3"] {
        let posts = backend.requests_to(Method::POST, &format!("selected-candidates/{}/send-offer", id));
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].json()["designation"], "Backend Engineer");
        assert_eq!(posts[0].json()["joiningDate"], "2026-12-01");
    }
    assert_eq!(
        notifier.last(),
        Some((ToastLevel::Success, "Offer letters sent to 3 candidate(s)".to_string()))
    );
}

#[tokio::test]
async fn one_failed_offer_fails_the_batch() {
    let backend = MockBackend::start().await;
    backend.ok(Method::POST, "selected-candidates/s1/send-offer", json!({}));
    backend.on(
        Method::POST,
        "selected-candidates/s2/send-offer",
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({"message": "Mail server unavailable"}),
    );
    let (app, notifier) = backend.app();

    let result = app
        .selected_candidates()
        .bulk_send_offers(&ids(&["s1", "s2"]), &offer())
        .await;

    assert!(result.is_err());
    assert!(notifier.messages(ToastLevel::Success).is_empty());
    assert_eq!(
        notifier.messages(ToastLevel::Error),
        vec!["Mail server unavailable".to_string()]
    );
}

#[tokio::test]
async fn empty_selection_and_bad_dates_are_caught_locally() {
    let backend = MockBackend::start().await;
    let (app, notifier) = backend.app();
    let view = app.selected_candidates();

    assert!(view.bulk_send_offers(&[], &offer()).await.is_err());
    let mut late = offer();
    late.offer_valid_until = NaiveDate::from_ymd_opt(2027, 1, 1);
    assert!(view.bulk_send_offers(&ids(&["s1"]), &late).await.is_err());

    assert!(backend.requests().is_empty());
    assert_eq!(
        notifier.messages(ToastLevel::Error),
        vec![
            "Please select at least one candidate".to_string(),
            "Offer validity must end on or before the joining date".to_string(),
        ]
    );
}

#[tokio::test]
async fn rows_without_documents_stay_listed() {
    let backend = MockBackend::start().await;
    backend.ok(
        Method::GET,
        "selected-candidates",
        json!([{"_id": "s1", "status": "selected"}]),
    );
    backend.on(
        Method::GET,
        "candidate-documents",
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({"message": "boom"}),
    );
    let (app, notifier) = backend.app();

    let rows = app
        .selected_candidates()
        .list(&SelectedCandidateQuery::default())
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert!(rows[0].documents.is_none());
    assert!(notifier.toasts().is_empty());
    let doc_calls = backend.requests_to(Method::GET, "candidate-documents");
    assert_eq!(doc_calls[0].query.as_deref(), Some("selectedCandidate=s1"));
}

#[tokio::test]
async fn wrong_file_type_is_never_uploaded() {
    let backend = MockBackend::start().await;
    let (app, notifier) = backend.app();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("setup.exe");
    std::fs::write(&path, b"MZ").unwrap();

    let result = app.selected_candidates().upload("s1", "passport", &path).await;

    assert!(result.is_err());
    assert!(backend.requests().is_empty());
    assert_eq!(notifier.messages(ToastLevel::Error).len(), 1);
}

#[tokio::test]
async fn oversized_file_is_never_uploaded() {
    let backend = MockBackend::start().await;
    let (app, notifier) = backend.app();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("passport.pdf");
    let file = std::fs::File::create(&path).unwrap();
    file.set_len(6 * 1024 * 1024).unwrap();

    assert!(app.selected_candidates().upload("s1", "passport", &path).await.is_err());
    assert!(backend.requests().is_empty());
    assert_eq!(
        notifier.messages(ToastLevel::Error),
        vec!["File size must be less than 5MB".to_string()]
    );
}

#[tokio::test]
async fn accepted_upload_is_multipart() {
    let backend = MockBackend::start().await;
    backend.ok(
        Method::POST,
        "candidate-documents",
        json!({"_id": "d1", "documentType": "passport", "status": "pending"}),
    );
    let (app, notifier) = backend.app();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("passport.pdf");
    std::fs::write(&path, b"%PDF-1.7").unwrap();

    app.selected_candidates()
        .upload("s1", "passport", &path)
        .await
        .unwrap();

    let upload = &backend.requests_to(Method::POST, "candidate-documents")[0];
    assert!(upload
        .content_type
        .as_deref()
        .unwrap_or_default()
        .starts_with("multipart/form-data"));
    assert_eq!(
        notifier.last(),
        Some((ToastLevel::Success, "Document uploaded successfully".to_string()))
    );
}

#[tokio::test]
async fn document_rejection_needs_a_reason() {
    let backend = MockBackend::start().await;
    backend.ok(
        Method::PUT,
        "candidate-documents/d1/verify",
        json!({"_id": "d1", "status": "rejected"}),
    );
    let mut prompter = MockPrompter::new();
    prompter
        .expect_prompt()
        .times(1)
        .returning(|_| Ok(DialogResult::Confirmed("Blurry scan".to_string())));
    let (app, _, _) = backend.app_with(Some("t"), prompter);

    assert!(app.selected_candidates().reject("d1").await.unwrap());

    let body = backend.requests_to(Method::PUT, "candidate-documents/d1/verify")[0].json();
    assert_eq!(body, json!({"status": "rejected", "rejectionReason": "Blurry scan"}));
}

#[tokio::test]
async fn dismissed_rejection_reason_explains_why() {
    let backend = MockBackend::start().await;
    let mut prompter = MockPrompter::new();
    prompter
        .expect_prompt()
        .times(1)
        .returning(|_| Ok(DialogResult::Dismissed));
    let (app, notifier, _) = backend.app_with(Some("t"), prompter);

    assert!(!app.selected_candidates().reject("d1").await.unwrap());
    assert!(backend.requests().is_empty());
    assert_eq!(
        notifier.last(),
        Some((
            ToastLevel::Info,
            "Document was not rejected: a reason is required".to_string()
        ))
    );
}

#[tokio::test]
async fn confirmed_document_delete_hits_backend() {
    let backend = MockBackend::start().await;
    backend.ok(Method::DELETE, "candidate-documents/d1", json!({}));
    let mut prompter = MockPrompter::new();
    prompter
        .expect_confirm()
        .times(1)
        .returning(|_| Ok(DialogResult::Confirmed(())));
    let (app, notifier, _) = backend.app_with(Some("t"), prompter);

    assert!(app.selected_candidates().delete_document("d1").await.unwrap());
    assert_eq!(backend.requests_to(Method::DELETE, "candidate-documents/d1").len(), 1);
    assert_eq!(
        notifier.last(),
        Some((ToastLevel::Success, "Document deleted successfully".to_string()))
    );
}

#[tokio::test]
async fn declined_document_delete_sends_nothing() {
    let backend = MockBackend::start().await;
    let mut prompter = MockPrompter::new();
    prompter
        .expect_confirm()
        .times(1)
        .returning(|_| Ok(DialogResult::Dismissed));
    let (app, _, _) = backend.app_with(Some("t"), prompter);

    assert!(!app.selected_candidates().delete_document("d1").await.unwrap());
    assert!(backend.requests().is_empty());
}
