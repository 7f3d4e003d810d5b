mod common;

use axum::http::{Method, StatusCode};
use common::{position_json, MockBackend, MockPrompter};
use mockall::predicate::eq;
use recruitment_admin::{
    dto::position_dto::PositionForm,
    models::position::{PositionFilter, PositionStatus},
    views::{notifier::ToastLevel, position_manager::DELETE_CONFIRM_MESSAGE, DialogResult},
};
use serde_json::json;

fn backend_engineer(min: f64, relevant: f64) -> PositionForm {
    PositionForm {
        minimum_experience: min,
        relevant_experience: relevant,
        description: "Build services".into(),
        requirements: vec!["Rust".into(), "  ".into()],
        ..PositionForm::new("Backend Engineer", "Engineering", "Remote")
    }
}

#[tokio::test]
async fn create_posts_form_and_refetches_list() {
    let backend = MockBackend::start().await;
    backend.ok(Method::POST, "positions", position_json("p1", "Backend Engineer", "active"));
    backend.ok(
        Method::GET,
        "positions",
        json!([position_json("p1", "Backend Engineer", "active")]),
    );
    let (app, notifier) = backend.app();
    let mut manager = app.position_manager();

    manager.create(backend_engineer(3.0, 2.0)).await.unwrap();

    let posts = backend.requests_to(Method::POST, "positions");
    assert_eq!(posts.len(), 1);
    let body = posts[0].json();
    assert_eq!(body["title"], "Backend Engineer");
    assert_eq!(body["minimumExperience"], json!(3.0));
    assert_eq!(body["relevantExperience"], json!(2.0));
    assert_eq!(body["status"], "active");
    assert_eq!(body["requirements"], json!(["Rust"]));
    assert_eq!(posts[0].authorization.as_deref(), Some("Bearer test-token"));

    assert_eq!(backend.requests_to(Method::GET, "positions").len(), 1);
    assert_eq!(manager.positions().len(), 1);
    assert_eq!(manager.positions()[0].status, PositionStatus::Active);
    assert_eq!(
        notifier.last(),
        Some((ToastLevel::Success, "Position created successfully".to_string()))
    );
}

#[tokio::test]
async fn invalid_experience_never_reaches_backend() {
    let backend = MockBackend::start().await;
    let (app, notifier) = backend.app();
    let mut manager = app.position_manager();

    assert!(manager.create(backend_engineer(2.0, 3.0)).await.is_err());

    assert!(backend.requests().is_empty());
    assert_eq!(
        notifier.messages(ToastLevel::Error),
        vec!["Relevant experience cannot be greater than minimum experience".to_string()]
    );
}

#[tokio::test]
async fn filter_is_sent_and_applied_locally() {
    let backend = MockBackend::start().await;
    backend.ok(
        Method::GET,
        "positions",
        json!({"positions": [
            position_json("p1", "Backend Engineer", "active"),
            position_json("p2", "Designer", "inactive")
        ]}),
    );
    let (app, _) = backend.app();
    let mut manager = app.position_manager();

    let shown = manager
        .load(PositionFilter::Only(PositionStatus::Inactive))
        .await
        .unwrap();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].id, "p2");
    let gets = backend.requests_to(Method::GET, "positions");
    assert_eq!(gets[0].query.as_deref(), Some("status=inactive"));
}

#[tokio::test]
async fn toggle_flips_cached_status() {
    let backend = MockBackend::start().await;
    backend.ok(
        Method::GET,
        "positions",
        json!([position_json("p1", "Backend Engineer", "active")]),
    );
    backend.ok(Method::PUT, "positions/p1", position_json("p1", "Backend Engineer", "inactive"));
    let (app, notifier) = backend.app();
    let mut manager = app.position_manager();
    manager.load(PositionFilter::All).await.unwrap();

    manager.toggle_status("p1").await.unwrap();

    let puts = backend.requests_to(Method::PUT, "positions/p1");
    assert_eq!(puts[0].json(), json!({"status": "inactive"}));
    assert_eq!(
        notifier.messages(ToastLevel::Success),
        vec!["Position marked as inactive".to_string()]
    );
}

#[tokio::test]
async fn delete_with_applications_asks_again_then_forces() {
    let backend = MockBackend::start().await;
    backend.on(
        Method::DELETE,
        "positions/p1",
        StatusCode::BAD_REQUEST,
        json!({
            "success": false,
            "message": "Cannot delete position with existing applications.",
            "hasApplications": true,
            "applicationsCount": 2
        }),
    );
    backend.on(Method::DELETE, "positions/p1", StatusCode::OK, json!({"success": true}));
    backend.ok(Method::GET, "positions", json!([]));

    let mut prompter = MockPrompter::new();
    prompter
        .expect_confirm()
        .with(eq(DELETE_CONFIRM_MESSAGE))
        .times(1)
        .returning(|_| Ok(DialogResult::Confirmed(())));
    prompter
        .expect_confirm()
        .withf(|q: &str| q.contains("2 application(s)"))
        .times(1)
        .returning(|_| Ok(DialogResult::Confirmed(())));
    let (app, notifier, _) = backend.app_with(Some("t"), prompter);
    let mut manager = app.position_manager();

    assert!(manager.delete("p1").await.unwrap());

    let deletes = backend.requests_to(Method::DELETE, "positions/p1");
    assert_eq!(deletes.len(), 2);
    assert_eq!(deletes[0].query, None);
    assert_eq!(deletes[1].query.as_deref(), Some("force=true"));
    assert_eq!(
        notifier.last(),
        Some((
            ToastLevel::Success,
            "Position and its applications deleted successfully".to_string()
        ))
    );
}

#[tokio::test]
async fn declining_forced_delete_keeps_position() {
    let backend = MockBackend::start().await;
    backend.on(
        Method::DELETE,
        "positions/p1",
        StatusCode::BAD_REQUEST,
        json!({"message": "Position has applications", "hasApplications": true, "applicationsCount": 1}),
    );

    let mut prompter = MockPrompter::new();
    let mut answers = vec![DialogResult::Dismissed, DialogResult::Confirmed(())];
    prompter
        .expect_confirm()
        .times(2)
        .returning(move |_| Ok(answers.pop().unwrap_or(DialogResult::Dismissed)));
    let (app, notifier, _) = backend.app_with(Some("t"), prompter);
    let mut manager = app.position_manager();

    assert!(!manager.delete("p1").await.unwrap());
    assert_eq!(backend.requests_to(Method::DELETE, "positions/p1").len(), 1);
    assert_eq!(
        notifier.last(),
        Some((ToastLevel::Info, "Position was not deleted".to_string()))
    );
}

#[tokio::test]
async fn dismissed_first_confirmation_sends_nothing() {
    let backend = MockBackend::start().await;
    let mut prompter = MockPrompter::new();
    prompter
        .expect_confirm()
        .times(1)
        .returning(|_| Ok(DialogResult::Dismissed));
    let (app, _, _) = backend.app_with(Some("t"), prompter);

    assert!(!app.position_manager().delete("p1").await.unwrap());
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn missing_title_is_reported_before_experience_rule() {
    let backend = MockBackend::start().await;
    let (app, notifier) = backend.app();
    let mut manager = app.position_manager();
    let form = PositionForm {
        title: "   ".into(),
        ..backend_engineer(1.0, 5.0)
    };

    assert!(manager.create(form).await.is_err());
    assert!(backend.requests().is_empty());
    assert_eq!(
        notifier.messages(ToastLevel::Error),
        vec!["Title is required".to_string()]
    );
}
