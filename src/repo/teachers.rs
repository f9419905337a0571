//! Teacher persistence.

use super::bulk::BulkError;
use crate::error::AppError;
use crate::model::{NewTeacher, Teacher, TeacherPatch, TeacherUpdate};
use crate::sql::{ListQuery, PageMeta, PageRequest, SortKey, TEACHER_FIELDS};
use sqlx::PgPool;

const SELECT: &str =
    "SELECT id, first_name, last_name, email, class, subject FROM teachers";
const COUNT: &str = "SELECT COUNT(*) FROM teachers";

pub struct TeacherRepo;

impl TeacherRepo {
    /// List with filters, search, sort, and pagination; returns the page of
    /// rows plus metadata derived from the paired COUNT query.
    pub async fn list(
        pool: &PgPool,
        filters: &[(String, String)],
        search: Option<&str>,
        sort: &[SortKey],
        page: &PageRequest,
    ) -> Result<(Vec<Teacher>, PageMeta), AppError> {
        let q = ListQuery::compose(&TEACHER_FIELDS, filters, search, sort, page);

        let count_sql = q.count_sql(COUNT);
        tracing::debug!(sql = %count_sql, args = ?q.args, "count");
        let mut count = sqlx::query_scalar::<_, i64>(&count_sql);
        for arg in &q.args {
            count = count.bind(arg);
        }
        let total = count.fetch_one(pool).await?;

        let data_sql = q.data_sql(SELECT);
        tracing::debug!(sql = %data_sql, args = ?q.args, "query");
        let mut rows = sqlx::query_as::<_, Teacher>(&data_sql);
        for arg in &q.args {
            rows = rows.bind(arg);
        }
        let teachers = rows.bind(q.limit).bind(q.offset).fetch_all(pool).await?;

        Ok((teachers, page.meta(total)))
    }

    pub async fn find(pool: &PgPool, id: i64) -> Result<Option<Teacher>, AppError> {
        let row = sqlx::query_as::<_, Teacher>(&format!("{SELECT} WHERE id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    pub async fn insert(pool: &PgPool, new: &NewTeacher) -> Result<i64, AppError> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO teachers (first_name, last_name, email, class, subject) \
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(&new.email)
        .bind(&new.class)
        .bind(&new.subject)
        .fetch_one(pool)
        .await?;
        Ok(id)
    }

    /// Full update: fields absent from the request keep their stored values.
    /// Returns the merged row, or None when the id does not exist.
    pub async fn update(
        pool: &PgPool,
        id: i64,
        update: TeacherUpdate,
    ) -> Result<Option<Teacher>, AppError> {
        let Some(existing) = Self::find(pool, id).await? else {
            return Ok(None);
        };
        let merged = update.merge(existing);
        sqlx::query(
            "UPDATE teachers SET first_name = $1, last_name = $2, email = $3, \
             class = $4, subject = $5 WHERE id = $6",
        )
        .bind(&merged.first_name)
        .bind(&merged.last_name)
        .bind(&merged.email)
        .bind(&merged.class)
        .bind(&merged.subject)
        .bind(id)
        .execute(pool)
        .await?;
        Ok(Some(merged))
    }

    /// Returns false when no row had this id.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM teachers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete the whole batch in one transaction. A missing id is a hard
    /// stop: the transaction rolls back and no later ids are touched.
    pub async fn delete_many(pool: &PgPool, ids: &[i64]) -> Result<(), BulkError> {
        let mut tx = pool.begin().await?;
        for &id in ids {
            let result = sqlx::query("DELETE FROM teachers WHERE id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            if result.rows_affected() == 0 {
                tx.rollback().await?;
                return Err(BulkError::NotFound(id));
            }
        }
        tx.commit().await.map_err(BulkError::Commit)
    }

    /// Patch the whole batch in one transaction. Each row is fetched inside
    /// the transaction, merged with the patch, and written back; the first
    /// missing row rolls everything back.
    pub async fn patch_many(pool: &PgPool, updates: &[TeacherPatch]) -> Result<(), BulkError> {
        let mut tx = pool.begin().await?;
        for patch in updates {
            let row = sqlx::query_as::<_, Teacher>(&format!("{SELECT} WHERE id = $1"))
                .bind(patch.id)
                .fetch_optional(&mut *tx)
                .await?;
            let Some(mut row) = row else {
                tx.rollback().await?;
                return Err(BulkError::NotFound(patch.id));
            };
            patch.apply(&mut row);
            sqlx::query(
                "UPDATE teachers SET first_name = $1, last_name = $2, email = $3, \
                 class = $4, subject = $5 WHERE id = $6",
            )
            .bind(&row.first_name)
            .bind(&row.last_name)
            .bind(&row.email)
            .bind(&row.class)
            .bind(&row.subject)
            .bind(patch.id)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await.map_err(BulkError::Commit)
    }
}
