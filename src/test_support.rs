//! Helpers for driving the router in tests.

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Request, Response},
    Router,
};
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;
use tower::ServiceExt;

use crate::{
    app::build_app,
    auth::password::hash_password,
    state::AppState,
    users::repo_types::{NewUser, UserId},
};

pub const BOUNDARY: &str = "accounts-test-boundary";

pub fn app() -> (Router, AppState) {
    let state = AppState::fake();
    (build_app(state.clone()), state)
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn json_body<T: DeserializeOwned>(response: Response<Body>) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Hand-built `multipart/form-data` body.
#[derive(Default)]
pub struct MultipartBody {
    bytes: Vec<u8>,
}

impl MultipartBody {
    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.bytes.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content: &[u8]) -> Self {
        self.bytes.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: image/jpeg\r\n\r\n"
            )
            .as_bytes(),
        );
        self.bytes.extend_from_slice(content);
        self.bytes.extend_from_slice(b"\r\n");
        self
    }

    pub fn into_request(mut self, uri: &str) -> Request<Body> {
        self.bytes
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(self.bytes))
            .unwrap()
    }
}

/// A complete, valid registration form; tests override single fields.
pub fn registration(email: &str, username: &str, password: &str) -> MultipartBody {
    MultipartBody::default()
        .text("email", email)
        .text("username", username)
        .text("password", password)
}

pub async fn seed_user(state: &AppState, username: &str) -> UserId {
    state
        .users
        .insert(NewUser {
            email: format!("{username}@example.com"),
            username: username.to_string(),
            password: hash_password("Secret1!"),
            country_code: "57".into(),
            profile_image: format!("uploads/{username}.jpg"),
            names: "Ana".into(),
            surnames: "Ruiz".into(),
            phone: "555-0101".into(),
            age: "30".into(),
            profession: "nurse".into(),
        })
        .await
        .unwrap()
}
