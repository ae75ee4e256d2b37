mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::{body_string, multipart_body, setup_app, BOUNDARY};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

fn json_request(method: &str, uri: &str, body: JsonValue) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn json_body(resp: axum::http::Response<Body>) -> JsonValue {
    serde_json::from_str(&body_string(resp).await).unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let (app, _) = setup_app(false).await;
    let resp = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["status"], "ok");
}

#[tokio::test]
async fn create_then_fetch_candidate() {
    let (app, _) = setup_app(false).await;

    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/candidates",
            json!({
                "name": "赵六",
                "phone": "13500000000",
                "email": "zhaoliu@example.com",
                "position": "Rust工程师",
                "experience": "3-5年",
                "education": "本科",
                "status": "待沟通",
                "tags": ["Rust", "Axum"]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created = json_body(resp).await;
    let id = created["id"].as_i64().unwrap();
    assert!(created["created_at"].is_string());

    let resp = app
        .oneshot(get(&format!("/api/candidates/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched = json_body(resp).await;
    assert_eq!(fetched, created);
    assert_eq!(fetched["tags"], json!(["Rust", "Axum"]));
}

#[tokio::test]
async fn create_requires_name_and_phone() {
    let (app, state) = setup_app(false).await;

    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/candidates",
            json!({ "name": "赵六", "phone": "" }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = app
        .oneshot(json_request(
            "POST",
            "/api/candidates",
            json!({ "name": "赵六", "phone": "1", "tags": ["a,b"] }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(resp).await["error"].as_str().unwrap().contains("comma"));

    assert_eq!(state.candidate_service.count().await.unwrap(), 0);
}

#[tokio::test]
async fn list_and_search_seeded_roster() {
    let (app, _) = setup_app(true).await;

    let resp = app.clone().oneshot(get("/api/candidates")).await.unwrap();
    let all = json_body(resp).await;
    let names: Vec<&str> = all
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["王五", "李四", "张三"]);

    let resp = app
        .clone()
        .oneshot(get("/api/candidates?keyword=Java"))
        .await
        .unwrap();
    let hits = json_body(resp).await;
    assert_eq!(hits.as_array().unwrap().len(), 1);
    assert_eq!(hits[0]["name"], "张三");

    let resp = app.oneshot(get("/api/candidates?keyword=")).await.unwrap();
    assert_eq!(json_body(resp).await, all);
}

#[tokio::test]
async fn unknown_candidate_is_404() {
    let (app, _) = setup_app(true).await;

    for uri in [
        "/api/candidates/99",
        "/api/candidates/99/files",
        "/api/candidates/99/comments",
        "/api/candidates/1/files/5",
    ] {
        let resp = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");
    }

    let resp = app
        .oneshot(json_request(
            "POST",
            "/api/candidates/99/comments",
            json!({ "text": "hi" }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn upload_list_and_download_file() {
    let (app, _) = setup_app(true).await;
    let content = b"%PDF-1.4 resume body".to_vec();

    let upload = Request::builder()
        .method("POST")
        .uri("/api/candidates/1/files")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body("r.pdf", &content)))
        .unwrap();
    let resp = app.clone().oneshot(upload).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let meta = json_body(resp).await;
    assert_eq!(meta["name"], "r.pdf");
    let file_id = meta["id"].as_i64().unwrap();

    let resp = app
        .clone()
        .oneshot(get("/api/candidates/1/files"))
        .await
        .unwrap();
    let files = json_body(resp).await;
    assert_eq!(files[0]["name"], "r.pdf");
    assert!(files[0].get("file_data").is_none());

    let resp = app
        .oneshot(get(&format!("/api/candidates/1/files/{file_id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[header::CONTENT_TYPE], "application/pdf");
    assert!(resp.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .contains("r.pdf"));
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(bytes.to_vec(), content);
}

#[tokio::test]
async fn download_header_encodes_non_ascii_names() {
    let (app, state) = setup_app(true).await;
    let meta = state
        .file_service
        .save_file(1, "简历.pdf", b"%PDF")
        .await
        .unwrap();

    let resp = app
        .oneshot(get(&format!("/api/candidates/1/files/{}", meta.id)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let disposition = resp.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.is_ascii());
    assert!(disposition.contains("filename=\"__.pdf\""));
    assert!(disposition.contains("filename*=UTF-8''%E7%AE%80%E5%8E%86.pdf"));
}

#[tokio::test]
async fn upload_rejects_disallowed_extension() {
    let (app, _) = setup_app(true).await;
    let upload = Request::builder()
        .method("POST")
        .uri("/api/candidates/1/files")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body("run.exe", b"MZ")))
        .unwrap();
    let resp = app.oneshot(upload).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn comments_api_newest_first_and_rejects_blank() {
    let (app, _) = setup_app(true).await;

    for text in ["电话沟通", "约二面"] {
        let resp = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/candidates/2/comments",
                json!({ "text": text }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/candidates/2/comments",
            json!({ "text": "   " }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = app
        .oneshot(get("/api/candidates/2/comments"))
        .await
        .unwrap();
    let comments = json_body(resp).await;
    let texts: Vec<&str> = comments
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["text"].as_str().unwrap())
        .collect();
    assert_eq!(texts, vec!["约二面", "电话沟通"]);
}

#[tokio::test]
async fn openapi_document_lists_candidate_paths() {
    let (app, _) = setup_app(false).await;
    let resp = app.oneshot(get("/api/openapi.json")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let doc = json_body(resp).await;
    assert!(doc["paths"]["/api/candidates"].is_object());
    assert!(doc["paths"]["/api/candidates/{id}/comments"].is_object());
}
