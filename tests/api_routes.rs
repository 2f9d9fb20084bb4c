use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::time::Duration;
use taskd::api;
use taskd::db::db::Db;
use taskd::db::tasks::TaskStore;
use taskd::libs::service::TaskService;
use taskd::libs::task::NewTask;
use tempfile::TempDir;
use tower::ServiceExt;

fn setup() -> (TempDir, Router, TaskService) {
    let temp_dir = tempfile::tempdir().unwrap();
    let db = Db::open(&temp_dir.path().join("taskd.db"), Duration::from_secs(5)).unwrap();
    let service = TaskService::new(TaskStore::new(db.conn()));
    let router = api::router(service.clone());
    (temp_dir, router, service)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder().method(method).uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn post_creates_task() {
    let (_temp, router, _service) = setup();

    let request = json_request(
        "POST",
        "/api1/public/tasks",
        json!({"title": "pay rent", "due_date": "2030-01-01"}),
    );
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["title"], "pay rent");
    assert_eq!(body["due_date"], "2030-01-01");
    assert_eq!(body["overdue"], false);
    assert!(body["id"].is_i64());
}

#[tokio::test]
async fn post_without_title_is_bad_request() {
    let (_temp, router, _service) = setup();

    let request = json_request("POST", "/api1/public/tasks", json!({"description": "no title"}));
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn post_with_bad_due_date_is_bad_request() {
    let (_temp, router, _service) = setup();

    let request = json_request(
        "POST",
        "/api1/public/tasks",
        json!({"title": "x", "due_date": "01/02/2030"}),
    );
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn post_duplicate_id_is_conflict() {
    let (_temp, router, service) = setup();
    service.create(&NewTask::new("existing").with_id(5)).unwrap();

    let request = json_request("POST", "/api1/public/tasks", json!({"id": 5, "title": "clash"}));
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn get_missing_task_is_not_found() {
    let (_temp, router, _service) = setup();

    let response = router
        .oneshot(empty_request("GET", "/api1/public/tasks/999"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_lists_all_tasks() {
    let (_temp, router, service) = setup();
    service.create(&NewTask::new("one")).unwrap();
    service.create(&NewTask::new("two")).unwrap();

    let response = router.oneshot(empty_request("GET", "/api1/public/tasks")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn put_existing_task_updates() {
    let (_temp, router, service) = setup();
    let task = service.create(&NewTask::new("old")).unwrap();

    let request = json_request(
        "PUT",
        &format!("/api1/public/tasks/{}", task.id),
        json!({"title": "new"}),
    );
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["title"], "new");
}

#[tokio::test]
async fn put_missing_task_creates_it() {
    let (_temp, router, service) = setup();

    let request = json_request("PUT", "/api1/public/tasks/17", json!({"title": "fresh"}));
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let stored = service.get_by_id(17).unwrap();
    assert_eq!(stored.title, "fresh");
}

#[tokio::test]
async fn patch_sets_completed() {
    let (_temp, router, service) = setup();
    let task = service.create(&NewTask::new("laundry")).unwrap();

    let request = json_request(
        "PATCH",
        &format!("/api1/public/tasks/{}/completed", task.id),
        json!({"completed": true}),
    );
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["completed"], true);
}

#[tokio::test]
async fn delete_task_round_trip() {
    let (_temp, router, service) = setup();
    let task = service.create(&NewTask::new("temporary")).unwrap();

    let response = router
        .clone()
        .oneshot(empty_request("DELETE", &format!("/api1/public/tasks/{}", task.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .oneshot(empty_request("DELETE", &format!("/api1/public/tasks/{}", task.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
