//! BDD step definitions for sending notifications

use std::sync::Arc;

use cucumber::{given, then, when};

use xmatters_notifier::io::{HttpClient, HttpResponse};
use xmatters_notifier::notifier::NotificationProvider;
use xmatters_notifier::settings::StaticSettings;
use xmatters_notifier::xmatters::XMattersNotifier;
use xmatters_notifier::XMattersError;

use crate::world::{NotifierWorld, Scripted};

async fn send(world: &mut NotifierWorld, message: &str) {
    let http: Arc<dyn HttpClient> = world.http.clone();
    let settings = match &world.base_url {
        Some(base_url) => StaticSettings::with_base_url(base_url.clone()),
        None => StaticSettings::default(),
    };
    let notifier = XMattersNotifier::new(http, Arc::new(settings));
    let result = notifier
        .send(
            &world.config,
            message,
            world.monitor.as_ref(),
            world.heartbeat.as_ref(),
        )
        .await;
    world.result = Some(result);
}

fn last_body(world: &NotifierWorld) -> serde_json::Value {
    world.http.last_request().body
}

fn error(world: &NotifierWorld) -> &XMattersError {
    let result = world.result.as_ref().expect("no result");
    result.as_ref().expect_err("notification unexpectedly succeeded")
}

#[given(expr = "xMatters responds with status {int} {string}")]
fn responds_with(world: &mut NotifierWorld, status: u16, text: String) {
    *world.http.notification.lock().unwrap() = Scripted::status(status, Some(text.as_str()), "");
}

#[given(expr = "xMatters responds with status {int} and no status text")]
fn responds_without_text(world: &mut NotifierWorld, status: u16) {
    *world.http.notification.lock().unwrap() = Scripted::status(status, None, "");
}

#[given("xMatters responds without a status code")]
fn responds_without_status(world: &mut NotifierWorld) {
    *world.http.notification.lock().unwrap() = Scripted::Respond(HttpResponse::default());
}

#[given("xMatters is unreachable")]
fn unreachable(world: &mut NotifierWorld) {
    *world.http.notification.lock().unwrap() = Scripted::Fail("connection refused".to_string());
}

#[given(expr = "the primary base URL is {string}")]
fn primary_base_url(world: &mut NotifierWorld, base_url: String) {
    world.base_url = Some(base_url);
}

#[when("a test notification is sent")]
async fn send_test(world: &mut NotifierWorld) {
    world.monitor = None;
    world.heartbeat = None;
    send(world, "Test").await;
}

#[when(expr = "the notification {string} is sent")]
async fn send_message(world: &mut NotifierWorld, message: String) {
    send(world, &message).await;
}

#[then("the notification should succeed")]
fn succeeds(world: &mut NotifierWorld) {
    let result = world.result.as_ref().expect("no result");
    let confirmation = result.as_ref().unwrap();
    assert!(confirmation.is_some());
}

#[then(expr = "the notification should succeed with a message containing {string}")]
fn succeeds_with(world: &mut NotifierWorld, text: String) {
    let result = world.result.as_ref().expect("no result");
    let confirmation = result.as_ref().unwrap().clone().expect("notification skipped");
    assert!(confirmation.contains(&text), "{confirmation}");
}

#[then("the notification should be skipped")]
fn skipped(world: &mut NotifierWorld) {
    let result = world.result.as_ref().expect("no result");
    assert!(result.as_ref().unwrap().is_none());
}

#[then(expr = "the notification should fail with status code {int}")]
fn fails_with_status(world: &mut NotifierWorld, status: u16) {
    match error(world) {
        XMattersError::HttpStatus(code) => assert_eq!(*code, status),
        other => panic!("expected HttpStatus, got {other:?}"),
    }
}

#[then("the notification should fail with an invalid response error")]
fn fails_invalid_response(world: &mut NotifierWorld) {
    assert!(matches!(error(world), XMattersError::InvalidResponse));
}

#[then("the notification should fail with a transport error")]
fn fails_transport(world: &mut NotifierWorld) {
    let err = error(world);
    assert!(matches!(err, XMattersError::Transport(_)), "{err:?}");
    assert!(err.to_string().contains("connection refused"));
}

#[then("the notification should fail with a token exchange error")]
fn fails_token_exchange(world: &mut NotifierWorld) {
    assert!(matches!(error(world), XMattersError::TokenExchange(_)));
}

#[then("no notification request should have been sent")]
fn nothing_sent(world: &mut NotifierWorld) {
    assert!(world.http.json_requests.lock().unwrap().is_empty());
}

#[then(expr = "the body field {string} should be {string}")]
fn body_field_string(world: &mut NotifierWorld, field: String, value: String) {
    assert_eq!(last_body(world)[field.as_str()], value.as_str());
}

#[then(expr = "the body field {string} should be {int}")]
fn body_field_int(world: &mut NotifierWorld, field: String, value: u64) {
    assert_eq!(last_body(world)[field.as_str()], value);
}

#[then(expr = "the body should not contain {string}")]
fn body_lacks(world: &mut NotifierWorld, field: String) {
    assert!(last_body(world).get(field.as_str()).is_none());
}
