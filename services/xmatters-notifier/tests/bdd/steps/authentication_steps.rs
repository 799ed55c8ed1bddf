//! BDD step definitions for authentication

use cucumber::{given, then};

use xmatters_notifier::config::AuthMethod;

use crate::world::{NotifierWorld, Scripted};

#[given(expr = "basic authentication as {string} with password {string}")]
fn basic_auth(world: &mut NotifierWorld, username: String, password: String) {
    world.xmatters_mut().auth = AuthMethod::Basic { username, password };
}

#[given(expr = "API key authentication with key {string} and secret {string}")]
fn api_key_auth(world: &mut NotifierWorld, api_key: String, secret: String) {
    world.xmatters_mut().auth = AuthMethod::ApiKey { api_key, secret };
}

#[given(expr = "OAuth authentication with client {string} as {string} with password {string}")]
fn oauth_auth(world: &mut NotifierWorld, client_id: String, username: String, password: String) {
    world.xmatters_mut().auth = AuthMethod::OAuth {
        client_id,
        username,
        password,
    };
}

#[given(expr = "the token endpoint returns access token {string}")]
fn token_returns(world: &mut NotifierWorld, token: String) {
    let body = serde_json::json!({ "access_token": token, "token_type": "bearer" }).to_string();
    *world.http.token.lock().unwrap() = Scripted::status(200, Some("OK"), &body);
}

#[given(expr = "the token endpoint returns status {int}")]
fn token_status(world: &mut NotifierWorld, status: u16) {
    *world.http.token.lock().unwrap() =
        Scripted::status(status, None, r#"{"error":"invalid_grant"}"#);
}

#[given(expr = "the token endpoint returns body {string}")]
fn token_body(world: &mut NotifierWorld, body: String) {
    *world.http.token.lock().unwrap() = Scripted::status(200, Some("OK"), &body);
}

#[then(expr = "the request should carry basic auth {string} with password {string}")]
fn carries_basic_auth(world: &mut NotifierWorld, username: String, password: String) {
    let request = world.http.last_request();
    let auth = request.basic_auth.expect("no basic auth on request");
    assert_eq!(auth.username, username);
    assert_eq!(auth.password, password);
}

#[then("the request should have no Authorization header")]
fn no_authorization_header(world: &mut NotifierWorld) {
    let request = world.http.last_request();
    assert_eq!(request.header("Authorization"), None);
}

#[then(expr = "the request should have Authorization header {string}")]
fn authorization_header(world: &mut NotifierWorld, value: String) {
    let request = world.http.last_request();
    assert_eq!(request.header("Authorization"), Some(value.as_str()));
    assert!(request.basic_auth.is_none());
}

#[then(expr = "a token should have been requested from {string}")]
fn token_requested_from(world: &mut NotifierWorld, url: String) {
    let requests = world.http.form_requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].0, url);
}

#[then(expr = "the token request should include {string} = {string}")]
fn token_request_includes(world: &mut NotifierWorld, key: String, value: String) {
    let requests = world.http.form_requests.lock().unwrap();
    let (_, params) = requests.first().expect("no token request");
    assert!(
        params.contains(&(key.clone(), value.clone())),
        "missing {key}={value} in {params:?}"
    );
}
