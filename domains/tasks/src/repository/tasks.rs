//! Task repository

use crate::domain::entities::{Task, TaskStatus};
use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, PgPool};
use todo_common::Result;
use uuid::Uuid;

/// Result of an overlap-checked insert
#[derive(Debug)]
pub enum CreateOutcome {
    Created(Task),
    OwnerNotFound,
    /// An existing task of the same owner intersects the requested window
    Overlapping(Task),
}

#[derive(Clone)]
pub struct TaskRepository {
    pool: PgPool,
}

impl TaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find task by ID
    pub async fn find(&self, id: Uuid) -> Result<Option<Task>> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, start_time, end_time, user_id,
                   status, time_added, last_updated
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    /// List a user's tasks ordered by id, starting after `after`
    pub async fn list_by_user(
        &self,
        user_id: Uuid,
        after: Option<Uuid>,
        limit: i64,
    ) -> Result<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, start_time, end_time, user_id,
                   status, time_added, last_updated
            FROM tasks
            WHERE user_id = $1 AND ($2::uuid IS NULL OR id > $2)
            ORDER BY id
            LIMIT $3
            "#,
        )
        .bind(user_id)
        .bind(after)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    /// Insert `task` unless its owner is gone or the window collides with
    /// another of the owner's tasks.
    ///
    /// The owner row is locked for the duration, so concurrent inserts for
    /// the same user are checked one after another.
    pub async fn create_unless_overlapping(&self, task: &Task) -> Result<CreateOutcome> {
        let mut transaction = self.pool.begin().await?;

        let owner = sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE id = $1 FOR UPDATE")
            .bind(task.user_id)
            .fetch_optional(&mut *transaction)
            .await?;
        if owner.is_none() {
            return Ok(CreateOutcome::OwnerNotFound);
        }

        if let Some(existing) =
            overlapping(&mut *transaction, task.user_id, task.start_time, task.end_time).await?
        {
            return Ok(CreateOutcome::Overlapping(existing));
        }

        let created = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (
                id, title, start_time, end_time, user_id,
                status, time_added, last_updated
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, title, start_time, end_time, user_id,
                      status, time_added, last_updated
            "#,
        )
        .bind(task.id)
        .bind(&task.title)
        .bind(task.start_time)
        .bind(task.end_time)
        .bind(task.user_id)
        .bind(task.status)
        .bind(task.time_added)
        .bind(task.last_updated)
        .fetch_one(&mut *transaction)
        .await?;

        transaction.commit().await?;
        Ok(CreateOutcome::Created(created))
    }

    /// Update task status
    pub async fn update_status(&self, id: Uuid, status: TaskStatus) -> Result<Option<Task>> {
        let updated = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks SET
                status = $2,
                last_updated = NOW()
            WHERE id = $1
            RETURNING id, title, start_time, end_time, user_id,
                      status, time_added, last_updated
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    /// Delete a task, returning the removed row
    pub async fn delete(&self, id: Uuid) -> Result<Option<Task>> {
        let deleted = sqlx::query_as::<_, Task>(
            r#"
            DELETE FROM tasks
            WHERE id = $1
            RETURNING id, title, start_time, end_time, user_id,
                      status, time_added, last_updated
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(deleted)
    }
}

/// First task of `user_id` whose window intersects `[start, end]`
async fn overlapping<'e, E>(
    executor: E,
    user_id: Uuid,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> std::result::Result<Option<Task>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Task>(
        r#"
        SELECT id, title, start_time, end_time, user_id,
               status, time_added, last_updated
        FROM tasks
        WHERE user_id = $1 AND start_time <= $3 AND end_time >= $2
        ORDER BY start_time
        LIMIT 1
        "#,
    )
    .bind(user_id)
    .bind(start)
    .bind(end)
    .fetch_optional(executor)
    .await
}
