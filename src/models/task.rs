use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Input structure for creating a task.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    /// The title of the task. Must be between 1 and 200 characters.
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// An optional description; defaults to the empty string when omitted.
    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

/// Input structure for updating a task. Both fields are required: an update
/// replaces the title and description wholesale.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskUpdate {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(max = 1000))]
    pub description: String,
}

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Unique identifier, assigned by the store.
    pub id: i64,
    /// Identifier of the user who owns the task.
    pub user_id: i32,
    /// The title of the task.
    pub title: String,
    /// The description of the task; may be empty, never null.
    pub description: String,
    /// Timestamp of when the task was created.
    pub created_at: DateTime<Utc>,
}

/// Pagination parameters for listing tasks.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// 1-based page number. Defaults to 1.
    pub page: Option<u32>,
    /// Page size. Defaults to 10, capped by the task service.
    pub limit: Option<u32>,
}

impl ListQuery {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1)
    }

    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(10)
    }
}
