//! Task endpoint handlers and their request types.

use crate::libs::error::TaskError;
use crate::libs::service::TaskService;
use crate::libs::task::NewTask;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::error;

/// Date format accepted for `due_date` at the API boundary.
const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Body for `POST /tasks`. An `id` may be supplied to pin the task's
/// identifier; otherwise the store assigns one.
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
}

/// Body for `PUT /tasks/{id}`: a full replace, so absent optional fields
/// are cleared rather than kept.
#[derive(Debug, Deserialize)]
pub struct ReplaceTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
}

/// Body for `PATCH /tasks/{id}/completed`.
#[derive(Debug, Deserialize)]
pub struct SetCompletedRequest {
    pub completed: bool,
}

pub async fn create_task(
    State(service): State<TaskService>,
    Json(request): Json<CreateTaskRequest>,
) -> Response {
    let due_date = match parse_due_date(request.due_date.as_deref()) {
        Ok(due_date) => due_date,
        Err(response) => return response,
    };
    let new = NewTask {
        id: request.id,
        title: request.title,
        description: request.description,
        due_date,
    };

    match service.create(&new) {
        Ok(task) => (StatusCode::CREATED, Json(task)).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn get_task(State(service): State<TaskService>, Path(id): Path<i64>) -> Response {
    match service.get_by_id(id) {
        Ok(task) => (StatusCode::OK, Json(task)).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn get_tasks(State(service): State<TaskService>) -> Response {
    match service.get_all() {
        Ok(tasks) => (StatusCode::OK, Json(tasks)).into_response(),
        Err(err) => error_response(err),
    }
}

/// Full replace with upsert fallback: updating a missing id creates the
/// task under that id and reports 201 instead of 200.
pub async fn replace_task(
    State(service): State<TaskService>,
    Path(id): Path<i64>,
    Json(request): Json<ReplaceTaskRequest>,
) -> Response {
    let due_date = match parse_due_date(request.due_date.as_deref()) {
        Ok(due_date) => due_date,
        Err(response) => return response,
    };
    let new = NewTask {
        id: None,
        title: request.title,
        description: request.description,
        due_date,
    };

    match service.replace(id, &new) {
        Ok((task, created)) => {
            let status = if created { StatusCode::CREATED } else { StatusCode::OK };
            (status, Json(task)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub async fn set_completed(
    State(service): State<TaskService>,
    Path(id): Path<i64>,
    Json(request): Json<SetCompletedRequest>,
) -> Response {
    match service.set_completed(id, request.completed) {
        Ok(task) => (StatusCode::OK, Json(task)).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn delete_task(State(service): State<TaskService>, Path(id): Path<i64>) -> Response {
    match service.delete(id) {
        Ok(()) => (StatusCode::OK, Json("task deleted")).into_response(),
        Err(err) => error_response(err),
    }
}

fn parse_due_date(raw: Option<&str>) -> Result<Option<NaiveDate>, Response> {
    match raw {
        None | Some("") => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, DUE_DATE_FORMAT)
            .map(Some)
            .map_err(|err| {
                error!(%err, "failed to parse due date");
                (StatusCode::BAD_REQUEST, Json("invalid due date")).into_response()
            }),
    }
}

fn error_response(err: TaskError) -> Response {
    let (status, message) = match err {
        TaskError::NotFound => (StatusCode::NOT_FOUND, "task not found"),
        TaskError::DuplicateId => (StatusCode::CONFLICT, "task already exists"),
        TaskError::MissingTitle => (StatusCode::BAD_REQUEST, "task title is required"),
        TaskError::Storage(err) => {
            error!(%err, "storage failure");
            (StatusCode::INTERNAL_SERVER_ERROR, "storage failure")
        }
    };
    (status, Json(message)).into_response()
}
