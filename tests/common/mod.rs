//! Shared helpers for integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use notes_api::api::{create_router, AppState};
use notes_api::config::Config;
use notes_api::infra::{FileRepository, Repository};

pub const SECRET: &str = "test-secret-key-for-testing-only-32chars";
pub const PASSWORD: &str = "Password1234$";

/// Router over a file repository in a fresh temp dir.
pub struct TestApp {
    pub router: Router,
    _dir: TempDir,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestApp {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let repo: Arc<dyn Repository> =
            Arc::new(FileRepository::open(dir.path()).await.expect("open repo"));
        let state = AppState::from_config(repo, Config::new(SECRET), None);

        Self::from_router(create_router(state), dir)
    }

    /// Wrap a custom router; `dir` is kept alive for the app's lifetime.
    pub fn from_router(router: Router, dir: TempDir) -> Self {
        Self { router, _dir: dir }
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        let response = self.router.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Register `login` and return its user id.
    pub async fn register(&self, login: &str) -> i32 {
        let response = self
            .send(
                Method::POST,
                "/api/user",
                None,
                Some(json!({
                    "login": login,
                    "password": PASSWORD,
                    "name": "John",
                    "surname": "Doe"
                })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.body["data"]["id"].as_i64().expect("id") as i32
    }

    pub async fn login(&self, login: &str, password: &str) -> TestResponse {
        self.send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "login": login, "password": password })),
        )
        .await
    }

    /// Register `login` and return a bearer token for it.
    pub async fn user_token(&self, login: &str) -> String {
        self.register(login).await;
        let response = self.login(login, PASSWORD).await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);
        response.body["data"]["access_token"]
            .as_str()
            .expect("token")
            .to_string()
    }

    pub async fn create_folder(&self, token: &str, title: &str) -> i32 {
        let response = self
            .send(
                Method::POST,
                "/api/folder",
                Some(token),
                Some(json!({ "title": title })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.body["data"]["id"].as_i64().expect("id") as i32
    }

    pub async fn create_note(&self, token: &str, title: &str, content: &str, tags: Value) -> i32 {
        let response = self
            .send(
                Method::POST,
                "/api/notes",
                Some(token),
                Some(json!({ "title": title, "content": content, "tags": tags })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.body["data"]["id"].as_i64().expect("id") as i32
    }
}

impl TestApp {
    /// Ids of the notes a search for `query` returns.
    pub async fn search(&self, token: &str, query: &str) -> Vec<i64> {
        let response = self
            .send(
                Method::GET,
                &format!("/api/notes/search?query={}", query),
                Some(token),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);
        note_ids(&response.body["data"])
    }
}

/// Ids of a JSON array of notes.
pub fn note_ids(notes: &Value) -> Vec<i64> {
    notes
        .as_array()
        .map(|notes| notes.iter().filter_map(|n| n["id"].as_i64()).collect())
        .unwrap_or_default()
}
