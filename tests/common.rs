/// Common test utilities for Local Library integration tests
///
/// This file contains shared functions for all integration tests: building
/// a test application on a private in-memory database, sending requests,
/// and reading responses.

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, Response},
    Router,
};
use locallibrary::{
    create_app,
    db::{init_pool, run_migrations, DbPool},
};
use serde::Serialize;
use std::sync::Arc;
use tower::ServiceExt;

/// Creates a test application with its own in-memory SQLite database
///
/// Each call uses a unique shared-cache URI, so all pooled connections of
/// one app see the same data while different tests stay isolated.
///
/// ### Returns
///
/// The router and the pool backing it, for seeding and assertions
#[allow(dead_code)]
pub fn create_test_app() -> (Router, Arc<DbPool>) {
    let database_url = format!("file:it_{}?mode=memory&cache=shared", uuid::Uuid::new_v4());
    let pool = Arc::new(init_pool(&database_url).unwrap());

    let conn = &mut pool.get().unwrap();
    run_migrations(conn).unwrap();

    (create_app(pool.clone()).unwrap(), pool)
}

/// Sends a GET request
#[allow(dead_code)]
pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .method("GET")
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Sends a POST request with an urlencoded form body
#[allow(dead_code)]
pub async fn post_form<T: Serialize>(app: &Router, uri: &str, form: &T) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .method("POST")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(serde_html_form::to_string(form).unwrap()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Reads the response body as text
#[allow(dead_code)]
pub async fn body_text(response: Response<Body>) -> String {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

/// Returns the Location header of a redirect
#[allow(dead_code)]
pub fn location(response: &Response<Body>) -> String {
    response.headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string()
}
