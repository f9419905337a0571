//! Exec persistence, including the credential columns the auth flows use.
//! Public reads never select the password hash or reset-token columns.

use crate::error::AppError;
use crate::model::{Exec, ExecCredentials, ExecUpdate, NewExec};
use crate::sql::{ListQuery, PageMeta, PageRequest, SortKey, EXEC_FIELDS};
use chrono::{DateTime, Utc};
use sqlx::PgPool;

const SELECT: &str = "SELECT id, first_name, last_name, email, username, inactive, role, \
     user_created_at, password_changed_at FROM execs";
const COUNT: &str = "SELECT COUNT(*) FROM execs";

pub struct ExecRepo;

impl ExecRepo {
    pub async fn list(
        pool: &PgPool,
        filters: &[(String, String)],
        search: Option<&str>,
        sort: &[SortKey],
        page: &PageRequest,
    ) -> Result<(Vec<Exec>, PageMeta), AppError> {
        let q = ListQuery::compose(&EXEC_FIELDS, filters, search, sort, page);

        let count_sql = q.count_sql(COUNT);
        tracing::debug!(sql = %count_sql, args = ?q.args, "count");
        let mut count = sqlx::query_scalar::<_, i64>(&count_sql);
        for arg in &q.args {
            count = count.bind(arg);
        }
        let total = count.fetch_one(pool).await?;

        let data_sql = q.data_sql(SELECT);
        tracing::debug!(sql = %data_sql, args = ?q.args, "query");
        let mut rows = sqlx::query_as::<_, Exec>(&data_sql);
        for arg in &q.args {
            rows = rows.bind(arg);
        }
        let execs = rows.bind(q.limit).bind(q.offset).fetch_all(pool).await?;

        Ok((execs, page.meta(total)))
    }

    pub async fn find(pool: &PgPool, id: i64) -> Result<Option<Exec>, AppError> {
        let row = sqlx::query_as::<_, Exec>(&format!("{SELECT} WHERE id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool, AppError> {
        let id: Option<i64> = sqlx::query_scalar("SELECT id FROM execs WHERE email = $1")
            .bind(email)
            .fetch_optional(pool)
            .await?;
        Ok(id.is_some())
    }

    /// Insert with an already-encoded password hash. The plaintext never
    /// reaches this layer.
    pub async fn insert(pool: &PgPool, new: &NewExec, encoded_hash: &str) -> Result<i64, AppError> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO execs (first_name, last_name, email, username, password, role, inactive) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING id",
        )
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(&new.email)
        .bind(&new.username)
        .bind(encoded_hash)
        .bind(&new.role)
        .bind(new.inactive)
        .fetch_one(pool)
        .await?;
        Ok(id)
    }

    pub async fn update(
        pool: &PgPool,
        id: i64,
        update: ExecUpdate,
    ) -> Result<Option<Exec>, AppError> {
        let Some(existing) = Self::find(pool, id).await? else {
            return Ok(None);
        };
        let merged = update.merge(existing);
        sqlx::query(
            "UPDATE execs SET first_name = $1, last_name = $2, email = $3, \
             username = $4, role = $5, inactive = $6 WHERE id = $7",
        )
        .bind(&merged.first_name)
        .bind(&merged.last_name)
        .bind(&merged.email)
        .bind(&merged.username)
        .bind(&merged.role)
        .bind(merged.inactive)
        .bind(id)
        .execute(pool)
        .await?;
        Ok(Some(merged))
    }

    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM execs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // ── credential queries, used only by the auth flows ──

    pub async fn credentials_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<ExecCredentials>, AppError> {
        let row = sqlx::query_as::<_, ExecCredentials>(
            "SELECT id, username, role, password, inactive FROM execs WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }

    pub async fn credentials_by_id(
        pool: &PgPool,
        id: i64,
    ) -> Result<Option<ExecCredentials>, AppError> {
        let row = sqlx::query_as::<_, ExecCredentials>(
            "SELECT id, username, role, password, inactive FROM execs WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }

    pub async fn set_password(pool: &PgPool, id: i64, encoded_hash: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE execs SET password = $1, password_changed_at = NOW() WHERE id = $2")
            .bind(encoded_hash)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    pub async fn id_by_email(pool: &PgPool, email: &str) -> Result<Option<i64>, AppError> {
        let id = sqlx::query_scalar("SELECT id FROM execs WHERE email = $1")
            .bind(email)
            .fetch_optional(pool)
            .await?;
        Ok(id)
    }

    /// Store the digest of a freshly issued reset token, replacing any
    /// previous one.
    pub async fn set_reset_token(
        pool: &PgPool,
        id: i64,
        digest: &str,
        expires: DateTime<Utc>,
    ) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE execs SET password_reset_token = $1, password_token_expires = $2 WHERE id = $3",
        )
        .bind(digest)
        .bind(expires)
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Find the account holding an unexpired reset token with this digest.
    pub async fn id_by_reset_digest(
        pool: &PgPool,
        digest: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<i64>, AppError> {
        let id = sqlx::query_scalar(
            "SELECT id FROM execs WHERE password_reset_token = $1 AND password_token_expires > $2",
        )
        .bind(digest)
        .bind(now)
        .fetch_optional(pool)
        .await?;
        Ok(id)
    }

    /// Complete a reset: new hash, cleared token columns, stamped change time.
    pub async fn reset_password(pool: &PgPool, id: i64, encoded_hash: &str) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE execs SET password = $1, password_reset_token = NULL, \
             password_token_expires = NULL, password_changed_at = NOW() WHERE id = $2",
        )
        .bind(encoded_hash)
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }
}
