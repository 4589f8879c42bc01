/// Session model and database operations
///
/// Sessions back the login cookie: the browser holds an opaque random
/// token, the server holds the row mapping that token to a user and an
/// expiry. Logout deletes the row, so revocation is immediate rather
/// than waiting for a token to age out.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE sessions (
///     token VARCHAR(64) PRIMARY KEY,
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     expires_at TIMESTAMPTZ NOT NULL
/// );
/// ```

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::session::generate_token;

/// Session model representing one logged-in browser
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Session {
    /// Opaque random token, also the primary key
    pub token: String,

    /// User this session belongs to
    pub user_id: Uuid,

    /// When the session was issued
    pub created_at: DateTime<Utc>,

    /// When the session stops being accepted
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Issues a new session for `user_id` valid for `ttl`
    pub async fn create(pool: &PgPool, user_id: Uuid, ttl: Duration) -> Result<Self, sqlx::Error> {
        let token = generate_token();
        let expires_at = Utc::now() + ttl;

        let session = sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (token, user_id, expires_at)
            VALUES ($1, $2, $3)
            RETURNING token, user_id, created_at, expires_at
            "#,
        )
        .bind(token)
        .bind(user_id)
        .bind(expires_at)
        .fetch_one(pool)
        .await?;

        Ok(session)
    }

    /// Resolves an unexpired session by token
    ///
    /// Expired sessions are treated exactly like unknown tokens.
    pub async fn find_valid(pool: &PgPool, token: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Session>(
            r#"
            SELECT token, user_id, created_at, expires_at
            FROM sessions
            WHERE token = $1 AND expires_at > NOW()
            "#,
        )
        .bind(token)
        .fetch_optional(pool)
        .await
    }

    /// Revokes a session (logout)
    ///
    /// Returns whether a row was actually removed; deleting an unknown
    /// token is not an error.
    pub async fn delete(pool: &PgPool, token: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Removes sessions past their expiry
    ///
    /// Expired rows are already ignored by [`Session::find_valid`]; this
    /// is housekeeping to keep the table small.
    pub async fn delete_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= NOW()")
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }
}
