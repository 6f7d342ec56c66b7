//! Integration tests for the save action against an in-process server
//!
//! Tests cover:
//! - Payload posted as the form-encoded `data` field
//! - Success / failure notices and the pending indicator
//! - Invalid forms never reaching the server
//! - Transport failures reported as generic errors

use axum::{extract::State, http::StatusCode, routing::post, Form, Router};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use watcher_save::feedback::{FeedbackEvent, RecordingFeedback, FAILED_MESSAGE, SAVED_MESSAGE};
use watcher_save::{preview, save, Notice, SaveReport, SettingsClient};
use watcher_settings::form::{Backend, BackendForm, Control, Scope};
use watcher_settings::{Category, FormRules, SettingsForm};

/// Test helper: shared state of the fake settings endpoint
#[derive(Clone)]
struct Endpoint {
    hits: Arc<AtomicUsize>,
    payloads: Arc<Mutex<Vec<String>>>,
    status: StatusCode,
    reply: &'static str,
}

async fn save_settings(
    State(endpoint): State<Endpoint>,
    Form(fields): Form<HashMap<String, String>>,
) -> (StatusCode, &'static str) {
    endpoint.hits.fetch_add(1, Ordering::SeqCst);
    endpoint
        .payloads
        .lock()
        .unwrap()
        .push(fields.get("data").cloned().unwrap_or_default());
    (endpoint.status, endpoint.reply)
}

/// Test helper: start the fake server, returning its url base
async fn spawn_endpoint(status: StatusCode, reply: &'static str) -> (String, Endpoint) {
    let endpoint = Endpoint {
        hits: Arc::new(AtomicUsize::new(0)),
        payloads: Arc::new(Mutex::new(Vec::new())),
        status,
        reply,
    };

    let app = Router::new()
        .route("/watcher/ajax/save_settings", post(save_settings))
        .with_state(endpoint.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/watcher/", addr), endpoint)
}

fn client(url_base: &str) -> SettingsClient {
    SettingsClient::new(url_base, Duration::from_secs(5)).unwrap()
}

fn postprocessing_form() -> SettingsForm {
    SettingsForm {
        postprocessing: Scope::new(vec![
            Control::toggle("renamerenabled", true),
            Control::text("moveextensions", "srt, nfo"),
        ]),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_successful_save_posts_document() {
    let (url_base, endpoint) = spawn_endpoint(StatusCode::OK, r#"{"response": "success"}"#).await;
    let form = postprocessing_form();
    let rules = FormRules::default();
    let feedback = RecordingFeedback::new();

    let report = save(Category::Postprocessing, &form, &rules, &client(&url_base), &feedback).await;

    assert_eq!(report, SaveReport::Saved);
    assert_eq!(endpoint.hits.load(Ordering::SeqCst), 1);

    let posted = endpoint.payloads.lock().unwrap()[0].clone();
    assert_eq!(posted, preview(Category::Postprocessing, &form, &rules).unwrap());
    assert_eq!(
        posted,
        r#"{"Postprocessing":{"moveextensions":"srt,nfo","renamerenabled":"true"}}"#
    );

    assert_eq!(
        feedback.events(),
        vec![
            FeedbackEvent::Pending(Category::Postprocessing, true),
            FeedbackEvent::Pending(Category::Postprocessing, false),
            FeedbackEvent::Notice(Notice::Success, SAVED_MESSAGE.to_string()),
        ]
    );
}

#[tokio::test]
async fn test_server_fail_response_shows_error() {
    let (url_base, endpoint) = spawn_endpoint(StatusCode::OK, r#"{"response": "fail"}"#).await;
    let feedback = RecordingFeedback::new();

    let report = save(
        Category::Postprocessing,
        &postprocessing_form(),
        &FormRules::default(),
        &client(&url_base),
        &feedback,
    )
    .await;

    assert_eq!(report, SaveReport::ServerFailed);
    assert_eq!(endpoint.hits.load(Ordering::SeqCst), 1);
    assert_eq!(
        feedback.events().last(),
        Some(&FeedbackEvent::Notice(Notice::Error, FAILED_MESSAGE.to_string()))
    );
}

#[tokio::test]
async fn test_invalid_form_never_reaches_server() {
    let (url_base, endpoint) = spawn_endpoint(StatusCode::OK, r#"{"response": "success"}"#).await;
    let form = SettingsForm {
        server: Scope::new(vec![
            Control::text("serverhost", ""),
            Control::text("serverport", ""),
        ]),
        ..Default::default()
    };
    let feedback = RecordingFeedback::new();

    let report = save(Category::Server, &form, &FormRules::default(), &client(&url_base), &feedback).await;

    assert!(matches!(report, SaveReport::Cancelled(_)));
    assert_eq!(endpoint.hits.load(Ordering::SeqCst), 0);

    let events = feedback.events();
    let highlighted = events
        .iter()
        .filter(|event| matches!(event, FeedbackEvent::Highlight(_)))
        .count();
    assert_eq!(highlighted, 2);
    assert!(events.contains(&FeedbackEvent::Notice(
        Notice::Warning,
        "Please fill in all required fields.".to_string()
    )));
    assert!(!events
        .iter()
        .any(|event| matches!(event, FeedbackEvent::Pending(..))));
}

#[tokio::test]
async fn test_two_downloaders_cancel_any_category() {
    let (url_base, endpoint) = spawn_endpoint(StatusCode::OK, r#"{"response": "success"}"#).await;
    let mut form = postprocessing_form();
    form.downloader.backends = vec![
        BackendForm::new(Backend::DelugeWeb, true, vec![]),
        BackendForm::new(Backend::QBittorrent, true, vec![]),
    ];
    let feedback = RecordingFeedback::new();

    let report = save(
        Category::Postprocessing,
        &form,
        &FormRules::default(),
        &client(&url_base),
        &feedback,
    )
    .await;

    assert!(matches!(report, SaveReport::Cancelled(_)));
    assert_eq!(endpoint.hits.load(Ordering::SeqCst), 0);
    assert_eq!(
        feedback.events(),
        vec![FeedbackEvent::Notice(
            Notice::Warning,
            "Please enable only one downloader.".to_string()
        )]
    );
}

#[tokio::test]
async fn test_http_error_status_is_submit_failure() {
    let (url_base, _endpoint) = spawn_endpoint(StatusCode::INTERNAL_SERVER_ERROR, "boom").await;
    let feedback = RecordingFeedback::new();

    let report = save(
        Category::Postprocessing,
        &postprocessing_form(),
        &FormRules::default(),
        &client(&url_base),
        &feedback,
    )
    .await;

    assert!(matches!(report, SaveReport::SubmitFailed(ref reason) if reason.contains("500")));
    assert!(feedback
        .events()
        .contains(&FeedbackEvent::Pending(Category::Postprocessing, false)));
}

#[tokio::test]
async fn test_unreachable_server_is_submit_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let feedback = RecordingFeedback::new();
    let report = save(
        Category::Postprocessing,
        &postprocessing_form(),
        &FormRules::default(),
        &client(&format!("http://{}", addr)),
        &feedback,
    )
    .await;

    assert!(matches!(report, SaveReport::SubmitFailed(_)));
    assert_eq!(
        feedback.events().last(),
        Some(&FeedbackEvent::Notice(Notice::Error, FAILED_MESSAGE.to_string()))
    );
}
