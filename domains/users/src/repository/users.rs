//! User repository

use crate::domain::entities::{normalize_email, User};
use sqlx::PgPool;
use todo_common::{conflict_on_unique, Result};
use uuid::Uuid;

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new user; a taken email maps to `Error::Conflict`
    pub async fn create(&self, user: &User) -> Result<User> {
        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (
                id, first_name, last_name, email, password_hash,
                time_added, last_updated
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, first_name, last_name, email, password_hash,
                      time_added, last_updated
            "#,
        )
        .bind(user.id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.time_added)
        .bind(user.last_updated)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            conflict_on_unique(e, format!("user with email {} already exist", user.email))
        })?;

        Ok(created)
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, email, password_hash,
                   time_added, last_updated
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find user by email (case-insensitive)
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, email, password_hash,
                   time_added, last_updated
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(normalize_email(email))
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// List users ordered by id, starting after `after`
    pub async fn list(&self, after: Option<Uuid>, limit: i64) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, email, password_hash,
                   time_added, last_updated
            FROM users
            WHERE ($1::uuid IS NULL OR id > $1)
            ORDER BY id
            LIMIT $2
            "#,
        )
        .bind(after)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Delete a user, returning the removed row. Owned tasks go with it (FK cascade).
    pub async fn delete(&self, id: Uuid) -> Result<Option<User>> {
        let deleted = sqlx::query_as::<_, User>(
            r#"
            DELETE FROM users
            WHERE id = $1
            RETURNING id, first_name, last_name, email, password_hash,
                      time_added, last_updated
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(deleted)
    }
}
