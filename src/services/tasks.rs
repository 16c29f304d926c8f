use sqlx::PgPool;

use crate::error::AppError;
use crate::models::Task;
use crate::services::store_fault;

/// Upper bound on the page size; `limit` above this is clamped down.
pub const MAX_PAGE_SIZE: u32 = 100;

/// One page of an owner's tasks plus the owner's total task count.
#[derive(Debug)]
pub struct TaskPage {
    pub tasks: Vec<Task>,
    pub total: i64,
}

/// Normalizes a requested window: `page` is floored at 1, `limit` clamped to
/// 1..=`MAX_PAGE_SIZE`. The boundary echoes these effective values back to
/// the caller, so they must match what `list` actually queries with.
pub fn effective_window(page: u32, limit: u32) -> (u32, u32) {
    (page.max(1), limit.clamp(1, MAX_PAGE_SIZE))
}

/// Lists the owner's tasks newest-first, windowed by page/limit.
///
/// `total` counts all of the owner's tasks regardless of the window so the
/// caller can paginate. The window is normalized via [`effective_window`].
pub async fn list(
    pool: &PgPool,
    owner_id: i32,
    page: u32,
    limit: u32,
) -> Result<TaskPage, AppError> {
    let (page, limit) = effective_window(page, limit);
    let offset = (page as i64 - 1) * limit as i64;

    let tasks = sqlx::query_as::<_, Task>(
        "SELECT id, user_id, title, description, created_at FROM tasks
         WHERE user_id = $1
         ORDER BY created_at DESC, id DESC
         LIMIT $2 OFFSET $3",
    )
    .bind(owner_id)
    .bind(limit as i64)
    .bind(offset)
    .fetch_all(pool)
    .await
    .map_err(store_fault("fetching tasks"))?;

    let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks WHERE user_id = $1")
        .bind(owner_id)
        .fetch_one(pool)
        .await
        .map_err(store_fault("fetching tasks"))?;

    Ok(TaskPage { tasks, total })
}

/// Creates a task for the owner and returns the stored row.
pub async fn create(
    pool: &PgPool,
    owner_id: i32,
    title: &str,
    description: &str,
) -> Result<Task, AppError> {
    sqlx::query_as::<_, Task>(
        "INSERT INTO tasks (user_id, title, description) VALUES ($1, $2, $3)
         RETURNING id, user_id, title, description, created_at",
    )
    .bind(owner_id)
    .bind(title)
    .bind(description)
    .fetch_one(pool)
    .await
    .map_err(store_fault("creating task"))
}

/// Replaces a task's title and description, ownership-scoped.
///
/// Returns `None` when no task with this id belongs to the owner; a foreign
/// task and a missing one are indistinguishable to the caller. Lookup then
/// write is two statements; fine here because ownership never changes after
/// creation.
pub async fn update(
    pool: &PgPool,
    owner_id: i32,
    id: i64,
    title: &str,
    description: &str,
) -> Result<Option<Task>, AppError> {
    let owned: Option<(i64,)> =
        sqlx::query_as("SELECT id FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
            .map_err(store_fault("updating task"))?;

    if owned.is_none() {
        return Ok(None);
    }

    let task = sqlx::query_as::<_, Task>(
        "UPDATE tasks SET title = $1, description = $2
         WHERE id = $3 AND user_id = $4
         RETURNING id, user_id, title, description, created_at",
    )
    .bind(title)
    .bind(description)
    .bind(id)
    .bind(owner_id)
    .fetch_one(pool)
    .await
    .map_err(store_fault("updating task"))?;

    Ok(Some(task))
}

/// Deletes a task, ownership-scoped. Returns `false` when no task with this
/// id belongs to the owner.
pub async fn delete(pool: &PgPool, owner_id: i32, id: i64) -> Result<bool, AppError> {
    let owned: Option<(i64,)> =
        sqlx::query_as("SELECT id FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
            .map_err(store_fault("deleting task"))?;

    if owned.is_none() {
        return Ok(false);
    }

    sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(owner_id)
        .execute(pool)
        .await
        .map_err(store_fault("deleting task"))?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_window_bounds() {
        // In-range values pass through untouched.
        assert_eq!(effective_window(1, 10), (1, 10));
        assert_eq!(effective_window(7, MAX_PAGE_SIZE), (7, MAX_PAGE_SIZE));

        // Oversized limits are clamped, zero values normalized.
        assert_eq!(effective_window(1, 500), (1, MAX_PAGE_SIZE));
        assert_eq!(effective_window(0, 10), (1, 10));
        assert_eq!(effective_window(0, 0), (1, 1));
    }
}
