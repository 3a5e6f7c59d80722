//! Domain entities for the Tasks domain
//!
//! A task is a titled time window `[start_time, end_time]` owned by one user.
//! Windows of the same owner may not overlap.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use todo_common::{Error, Result};

/// Task progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Pending => write!(f, "pending"),
            TaskStatus::InProgress => write!(f, "in_progress"),
            TaskStatus::Completed => write!(f, "completed"),
        }
    }
}

/// Maximum title length (varchar(200))
const MAX_TITLE_LENGTH: usize = 200;

/// Task entity
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub user_id: Uuid,
    pub status: TaskStatus,
    pub time_added: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl Task {
    /// Create a new pending task
    pub fn new(
        user_id: Uuid,
        title: String,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Result<Self> {
        let title = title.trim().to_string();
        if title.is_empty() {
            return Err(Error::Validation("Title is required".to_string()));
        }
        if title.chars().count() > MAX_TITLE_LENGTH {
            return Err(Error::Validation(format!(
                "Title must be at most {} characters",
                MAX_TITLE_LENGTH
            )));
        }

        if end_time <= start_time {
            return Err(Error::Validation(
                "endTime must be after startTime".to_string(),
            ));
        }

        let now = Utc::now();
        Ok(Task {
            id: Uuid::new_v4(),
            title,
            start_time,
            end_time,
            user_id,
            status: TaskStatus::default(),
            time_added: now,
            last_updated: now,
        })
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}
