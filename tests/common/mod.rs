//! Shared fixtures: a mocked remote API and a router wired against it.

#![allow(dead_code)]

use anyhow::Result;
use axum::{
    body::{to_bytes, Body},
    http::{header::COOKIE, Request},
    response::Response,
    Router,
};
use folio::{
    api::{self, AppState},
    remote::ApiClient,
    session::CookieConfig,
};
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

pub const TOKEN: &str = "tok-123";

pub fn app(server: &MockServer, confirm_publish: bool) -> Result<Router> {
    let client = ApiClient::new(&server.uri(), Duration::from_secs(2))?;
    Ok(api::router(AppState::new(
        client,
        CookieConfig::new(false),
        confirm_publish,
    )))
}

pub fn session_cookie() -> String {
    format!("token={TOKEN}")
}

pub fn request(method: &str, uri: &str, body: Option<Value>) -> Result<Request<Body>> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(COOKIE, session_cookie());
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))?,
        None => builder.body(Body::empty())?,
    };
    Ok(request)
}

pub async fn json_body(response: Response) -> Result<Value> {
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

pub fn user_json() -> Value {
    json!({
        "id": "u1",
        "name": "Ada Lovelace",
        "email": "ada@folio.dev",
        "role": "admin"
    })
}

pub fn blog_json(id: &str, title: &str, published: bool) -> Value {
    json!({
        "id": id,
        "title": title,
        "slug": title.to_lowercase().replace(' ', "-"),
        "content": "Some content worth reading.",
        "published": published,
        "createdAt": "2024-03-05T10:00:00Z"
    })
}

pub fn project_json(id: &str, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "slug": title.to_lowercase(),
        "description": "A project description.",
        "features": "Cart, Stripe payments, Login",
        "githubUrl": "https://github.com/folio/shop",
        "liveUrl": "",
        "createdAt": "2024-01-15T00:00:00Z"
    })
}

/// Accepts the test session on `GET /api/auth/me`.
pub async fn mount_identity(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(header("cookie", session_cookie().as_str()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "user": user_json()
            })),
        )
        .mount(server)
        .await;
}
