use crate::{
    auth::CurrentUser,
    error::AppError,
    models::{ListQuery, Task, TaskInput, TaskUpdate},
    services::tasks,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde::Serialize;
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

#[derive(Debug, Serialize)]
struct TaskListResponse {
    tasks: Vec<Task>,
    page: u32,
    limit: u32,
    total: i64,
}

/// Retrieves a page of the authenticated user's tasks, newest first.
///
/// ## Query Parameters:
/// - `page` (optional): 1-based page number, defaults to 1.
/// - `limit` (optional): page size, defaults to 10 (capped at 100).
///
/// ## Responses:
/// - `200 OK`: `{tasks, page, limit, total}` where `total` ignores the window
///   and `page`/`limit` are the effective values after normalization.
/// - `401 Unauthorized` / `403 Forbidden`: handled by the auth middleware.
/// - `500 Internal Server Error`: on a store fault.
#[get("")]
pub async fn list_tasks(
    pool: web::Data<PgPool>,
    query: web::Query<ListQuery>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let (page, limit) = tasks::effective_window(query.page(), query.limit());

    let result = tasks::list(&pool, user.id, page, limit).await?;

    Ok(HttpResponse::Ok().json(TaskListResponse {
        tasks: result.tasks,
        page,
        limit,
        total: result.total,
    }))
}

/// Creates a new task owned by the authenticated user.
///
/// The owner is always the authenticated identity; it is never read from the
/// request body.
///
/// ## Request Body:
/// - `title`: required, 1..=200 characters.
/// - `description` (optional): defaults to the empty string.
///
/// ## Responses:
/// - `201 Created`: `{task}` with the stored row.
/// - `400 Bad Request`: missing or empty title.
/// - `500 Internal Server Error`: on a store fault.
#[post("")]
pub async fn create_task(
    pool: web::Data<PgPool>,
    task_data: web::Json<TaskInput>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let description = task_data.description.as_deref().unwrap_or("");
    let task = tasks::create(&pool, user.id, &task_data.title, description).await?;

    Ok(HttpResponse::Created().json(json!({ "task": task })))
}

/// Updates a task's title and description.
///
/// Only the owner can update a task; a task owned by someone else answers
/// exactly like a missing one.
///
/// ## Responses:
/// - `200 OK`: `{task}` with the updated row.
/// - `400 Bad Request`: missing title or description.
/// - `403 Forbidden`: task not found or not owned.
/// - `500 Internal Server Error`: on a store fault.
#[put("/{id}")]
pub async fn update_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<i64>,
    task_data: web::Json<TaskUpdate>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let updated = tasks::update(
        &pool,
        user.id,
        task_id.into_inner(),
        &task_data.title,
        &task_data.description,
    )
    .await?;

    match updated {
        Some(task) => Ok(HttpResponse::Ok().json(json!({ "task": task }))),
        None => Err(AppError::Forbidden("task not found or not owned".into())),
    }
}

/// Deletes a task by its ID.
///
/// ## Responses:
/// - `200 OK`: `{message}` acknowledgement, no entity body.
/// - `403 Forbidden`: task not found or not owned.
/// - `500 Internal Server Error`: on a store fault.
#[delete("/{id}")]
pub async fn delete_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<i64>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let deleted = tasks::delete(&pool, user.id, task_id.into_inner()).await?;

    if deleted {
        Ok(HttpResponse::Ok().json(json!({ "message": "task deleted" })))
    } else {
        Err(AppError::Forbidden("task not found or not owned".into()))
    }
}
