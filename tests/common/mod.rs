#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, Response, StatusCode},
    Router,
};
use candidate_tracker::{
    create_router,
    database::{pool::create_in_memory_pool, prepare_database},
    AppState,
};
use tower::ServiceExt;

pub const BOUNDARY: &str = "----candidate-tracker-test";

pub async fn setup_app(seed: bool) -> (Router, AppState) {
    let pool = create_in_memory_pool().await.expect("pool");
    prepare_database(&pool, seed).await.expect("schema");
    let state = AppState::new(pool);
    (create_router(state.clone(), None), state)
}

pub async fn body_string(resp: Response<Body>) -> String {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn form_body(pairs: &[(&str, &str)]) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (k, v) in pairs {
        serializer.append_pair(k, v);
    }
    serializer.finish()
}

pub fn multipart_body(file_name: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Minimal browser: remembers the session cookie between requests.
pub struct Browser {
    app: Router,
    cookie: Option<String>,
}

impl Browser {
    pub fn new(app: Router) -> Self {
        Self { app, cookie: None }
    }

    async fn send(&mut self, builder: axum::http::request::Builder, body: Body) -> Response<Body> {
        let builder = match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie.clone()),
            None => builder,
        };
        let resp = self
            .app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        if let Some(set) = resp.headers().get(header::SET_COOKIE) {
            let pair = set.to_str().unwrap().split(';').next().unwrap().to_string();
            self.cookie = Some(pair);
        }
        resp
    }

    pub async fn get(&mut self, uri: &str) -> (StatusCode, String) {
        let resp = self
            .send(Request::builder().method("GET").uri(uri), Body::empty())
            .await;
        let status = resp.status();
        (status, body_string(resp).await)
    }

    pub async fn post_form(&mut self, uri: &str, pairs: &[(&str, &str)]) -> Response<Body> {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded"),
            Body::from(form_body(pairs)),
        )
        .await
    }

    pub async fn post_file(&mut self, uri: &str, file_name: &str, data: &[u8]) -> Response<Body> {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                ),
            Body::from(multipart_body(file_name, data)),
        )
        .await
    }

    pub fn has_session(&self) -> bool {
        self.cookie.is_some()
    }
}
