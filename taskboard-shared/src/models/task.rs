/// Task model and database operations
///
/// Tasks are the core entity of taskboard: a single piece of work owned
/// by one user. Ownership controls both visibility and mutation rights
/// and is enforced here, at the store boundary, so no handler can reach
/// another user's rows by accident.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     owner_id UUID REFERENCES users(id) ON DELETE CASCADE,
///     title VARCHAR(150) NOT NULL,
///     description VARCHAR(500) NOT NULL DEFAULT '',
///     complete BOOLEAN NOT NULL DEFAULT FALSE,
///     created TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// `owner_id` is nullable: a task whose owner row has gone away by some
/// path other than the cascade is orphaned and visible to no
/// authenticated query. `created` is set by the database at insert time
/// and never mutated.
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::models::task::{CreateTask, Task, UpdateTask};
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, owner: Uuid) -> Result<(), Box<dyn std::error::Error>> {
/// let task = Task::create(&pool, owner, CreateTask {
///     title: "Buy milk".to_string(),
///     ..Default::default()
/// })
/// .await?;
///
/// Task::update(&pool, task.id, owner, UpdateTask {
///     complete: Some(true),
///     ..Default::default()
/// })
/// .await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Maximum task title length, in characters
pub const MAX_TITLE_LEN: usize = 150;

/// Maximum task description length, in characters
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Error type for task store operations
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    /// A field constraint was violated
    #[error("validation failed: {0}")]
    Validation(String),

    /// No task with the given id exists
    #[error("task not found")]
    NotFound,

    /// The task exists but belongs to another user (or to no one)
    #[error("task belongs to another user")]
    Forbidden,

    /// Underlying database failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Task model representing a single to-do item
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID, stable for the record's lifetime
    pub id: Uuid,

    /// Owning user (None for orphaned tasks, which nobody can see)
    pub owner_id: Option<Uuid>,

    /// Short title, required, at most 150 characters
    pub title: String,

    /// Longer free text, stored even when blank
    pub description: String,

    /// Whether the task is done; drives the default list ordering
    pub complete: bool,

    /// When the task was created; immutable after insert
    pub created: DateTime<Utc>,
}

/// Input for creating a new task
///
/// The owner is passed separately to [`Task::create`] from the
/// authenticated request context, never taken from client input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTask {
    /// Task title (required)
    pub title: String,

    /// Optional description; defaults to empty
    #[serde(default)]
    pub description: String,

    /// Completion flag; defaults to false
    #[serde(default)]
    pub complete: bool,
}

/// Input for updating a task
///
/// Only title, description, and complete are mutable. Owner and creation
/// timestamp cannot be changed after the fact. `None` fields are left
/// untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    /// New title
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,

    /// New completion flag
    pub complete: Option<bool>,
}

fn validate_title(title: &str) -> Result<(), TaskError> {
    if title.trim().is_empty() {
        return Err(TaskError::Validation("title is required".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(TaskError::Validation(format!(
            "title must be at most {} characters",
            MAX_TITLE_LEN
        )));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), TaskError> {
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(TaskError::Validation(format!(
            "description must be at most {} characters",
            MAX_DESCRIPTION_LEN
        )));
    }
    Ok(())
}

impl Task {
    /// Creates a new task owned by `owner`
    ///
    /// The owner comes from the authenticated session, so a user can only
    /// ever create tasks for themselves regardless of what the request
    /// body claims.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::Validation` if the title is empty or exceeds
    /// 150 characters, or the description exceeds 500 characters.
    pub async fn create(pool: &PgPool, owner: Uuid, data: CreateTask) -> Result<Self, TaskError> {
        validate_title(&data.title)?;
        validate_description(&data.description)?;

        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (owner_id, title, description, complete)
            VALUES ($1, $2, $3, $4)
            RETURNING id, owner_id, title, description, complete, created
            "#,
        )
        .bind(owner)
        .bind(data.title)
        .bind(data.description)
        .bind(data.complete)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Loads a task by id, enforcing ownership
    ///
    /// # Errors
    ///
    /// - `TaskError::NotFound` if no task with `id` exists
    /// - `TaskError::Forbidden` if the task belongs to another user or is
    ///   orphaned (NULL owner)
    pub async fn find_owned(pool: &PgPool, id: Uuid, owner: Uuid) -> Result<Self, TaskError> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, owner_id, title, description, complete, created
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(TaskError::NotFound)?;

        if task.owner_id != Some(owner) {
            return Err(TaskError::Forbidden);
        }

        Ok(task)
    }

    /// Updates a task's mutable fields, enforcing ownership
    ///
    /// `owner_id` and `created` are never touched. Fields left as `None`
    /// keep their current value. The write itself is a single atomic
    /// statement keyed on both id and owner.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        owner: Uuid,
        data: UpdateTask,
    ) -> Result<Self, TaskError> {
        // Distinguish NotFound from Forbidden before writing anything.
        Self::find_owned(pool, id, owner).await?;

        if let Some(ref title) = data.title {
            validate_title(title)?;
        }
        if let Some(ref description) = data.description {
            validate_description(description)?;
        }

        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = COALESCE($3, title),
                description = COALESCE($4, description),
                complete = COALESCE($5, complete)
            WHERE id = $1 AND owner_id = $2
            RETURNING id, owner_id, title, description, complete, created
            "#,
        )
        .bind(id)
        .bind(owner)
        .bind(data.title)
        .bind(data.description)
        .bind(data.complete)
        .fetch_optional(pool)
        .await?
        .ok_or(TaskError::NotFound)?;

        Ok(task)
    }

    /// Deletes a task, enforcing ownership
    ///
    /// A second delete of the same id reports `NotFound`, which callers
    /// treat as a non-fatal outcome rather than an invariant violation.
    pub async fn delete(pool: &PgPool, id: Uuid, owner: Uuid) -> Result<(), TaskError> {
        Self::find_owned(pool, id, owner).await?;

        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(TaskError::NotFound);
        }

        Ok(())
    }

    /// Lists all tasks belonging to `owner`, incomplete first
    ///
    /// Ties within the same completion state come back in
    /// storage-arbitrary order; callers must not depend on a stable order
    /// there.
    pub async fn list_by_owner(pool: &PgPool, owner: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, owner_id, title, description, complete, created
            FROM tasks
            WHERE owner_id = $1
            ORDER BY complete
            "#,
        )
        .bind(owner)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_title_required() {
        assert!(matches!(
            validate_title(""),
            Err(TaskError::Validation(_))
        ));
        assert!(matches!(
            validate_title("   "),
            Err(TaskError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_title_length_bounds() {
        let at_limit = "x".repeat(MAX_TITLE_LEN);
        assert!(validate_title(&at_limit).is_ok());

        let over_limit = "x".repeat(MAX_TITLE_LEN + 1);
        assert!(matches!(
            validate_title(&over_limit),
            Err(TaskError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_title_counts_characters_not_bytes() {
        // 150 multi-byte characters are within the limit even though the
        // byte length is far larger.
        let title = "ø".repeat(MAX_TITLE_LEN);
        assert!(title.len() > MAX_TITLE_LEN);
        assert!(validate_title(&title).is_ok());
    }

    #[test]
    fn test_validate_description_length_bounds() {
        assert!(validate_description("").is_ok());
        assert!(validate_description(&"x".repeat(MAX_DESCRIPTION_LEN)).is_ok());
        assert!(matches!(
            validate_description(&"x".repeat(MAX_DESCRIPTION_LEN + 1)),
            Err(TaskError::Validation(_))
        ));
    }

    #[test]
    fn test_create_task_defaults() {
        let data = CreateTask {
            title: "Buy milk".to_string(),
            ..Default::default()
        };
        assert!(data.description.is_empty());
        assert!(!data.complete);
    }

    #[test]
    fn test_task_error_display() {
        assert_eq!(TaskError::NotFound.to_string(), "task not found");
        assert_eq!(
            TaskError::Forbidden.to_string(),
            "task belongs to another user"
        );
        let err = TaskError::Validation("title is required".to_string());
        assert_eq!(err.to_string(), "validation failed: title is required");
    }
}
