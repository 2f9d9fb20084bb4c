//! HTTP surface for the task service.
//!
//! Thin layer over [`TaskService`]: routing, JSON binding, and the mapping
//! from [`TaskError`] kinds to status codes. All task semantics live in the
//! service.

use crate::libs::service::TaskService;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, patch, post};
use axum::Router;
use tracing::info;

pub mod tasks;

/// Builds the application router.
pub fn router(service: TaskService) -> Router {
    Router::new()
        .route(
            "/api1/public/tasks",
            post(tasks::create_task).get(tasks::get_tasks),
        )
        .route(
            "/api1/public/tasks/{id}",
            get(tasks::get_task)
                .put(tasks::replace_task)
                .delete(tasks::delete_task),
        )
        .route("/api1/public/tasks/{id}/completed", patch(tasks::set_completed))
        .layer(middleware::from_fn(log_request))
        .with_state(service)
}

/// Logs every request with its resolved status.
async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let response = next.run(request).await;
    info!(%method, %uri, status = response.status().as_u16(), "request");
    response
}
