//! Student persistence. Lists and reads join the classes table so the class
//! name travels with the row.

use super::bulk::BulkError;
use crate::error::AppError;
use crate::model::{NewStudent, Student, StudentPatch, StudentUpdate};
use crate::sql::{ListQuery, PageMeta, PageRequest, SortKey, STUDENT_FIELDS};
use sqlx::PgPool;

const SELECT: &str = "SELECT s.id, s.first_name, s.last_name, s.email, s.class_id, \
     c.name AS class FROM students s JOIN classes c ON s.class_id = c.id";
const COUNT: &str = "SELECT COUNT(*) FROM students s JOIN classes c ON s.class_id = c.id";

pub struct StudentRepo;

impl StudentRepo {
    pub async fn list(
        pool: &PgPool,
        filters: &[(String, String)],
        search: Option<&str>,
        sort: &[SortKey],
        page: &PageRequest,
    ) -> Result<(Vec<Student>, PageMeta), AppError> {
        let q = ListQuery::compose(&STUDENT_FIELDS, filters, search, sort, page);

        let count_sql = q.count_sql(COUNT);
        tracing::debug!(sql = %count_sql, args = ?q.args, "count");
        let mut count = sqlx::query_scalar::<_, i64>(&count_sql);
        for arg in &q.args {
            count = count.bind(arg);
        }
        let total = count.fetch_one(pool).await?;

        let data_sql = q.data_sql(SELECT);
        tracing::debug!(sql = %data_sql, args = ?q.args, "query");
        let mut rows = sqlx::query_as::<_, Student>(&data_sql);
        for arg in &q.args {
            rows = rows.bind(arg);
        }
        let students = rows.bind(q.limit).bind(q.offset).fetch_all(pool).await?;

        Ok((students, page.meta(total)))
    }

    pub async fn find(pool: &PgPool, id: i64) -> Result<Option<Student>, AppError> {
        let row = sqlx::query_as::<_, Student>(&format!("{SELECT} WHERE s.id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    /// Students in the class the given teacher teaches. None when the
    /// teacher does not exist.
    pub async fn of_teacher(
        pool: &PgPool,
        teacher_id: i64,
    ) -> Result<Option<Vec<Student>>, AppError> {
        let class: Option<String> =
            sqlx::query_scalar("SELECT class FROM teachers WHERE id = $1")
                .bind(teacher_id)
                .fetch_optional(pool)
                .await?;
        let Some(class) = class else {
            return Ok(None);
        };
        let students =
            sqlx::query_as::<_, Student>(&format!("{SELECT} WHERE c.name = $1 ORDER BY s.id"))
                .bind(&class)
                .fetch_all(pool)
                .await?;
        Ok(Some(students))
    }

    pub async fn insert(pool: &PgPool, new: &NewStudent) -> Result<i64, AppError> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO students (first_name, last_name, email, class_id) \
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(&new.email)
        .bind(new.class_id)
        .fetch_one(pool)
        .await?;
        Ok(id)
    }

    pub async fn update(
        pool: &PgPool,
        id: i64,
        update: StudentUpdate,
    ) -> Result<Option<Student>, AppError> {
        let Some(existing) = Self::find(pool, id).await? else {
            return Ok(None);
        };
        let merged = update.merge(existing);
        sqlx::query(
            "UPDATE students SET first_name = $1, last_name = $2, email = $3, \
             class_id = $4 WHERE id = $5",
        )
        .bind(&merged.first_name)
        .bind(&merged.last_name)
        .bind(&merged.email)
        .bind(merged.class_id)
        .bind(id)
        .execute(pool)
        .await?;
        // Re-read so the joined class name reflects a class change.
        Self::find(pool, id).await
    }

    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_many(pool: &PgPool, ids: &[i64]) -> Result<(), BulkError> {
        let mut tx = pool.begin().await?;
        for &id in ids {
            let result = sqlx::query("DELETE FROM students WHERE id = $1")
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

    pub async fn patch_many(pool: &PgPool, updates: &[StudentPatch]) -> Result<(), BulkError> {
        let mut tx = pool.begin().await?;
        for patch in updates {
            let row = sqlx::query_as::<_, Student>(&format!("{SELECT} WHERE s.id = $1"))
                .bind(patch.id)
                .fetch_optional(&mut *tx)
                .await?;
            let Some(mut row) = row else {
                tx.rollback().await?;
                return Err(BulkError::NotFound(patch.id));
            };
            patch.apply(&mut row);
            sqlx::query(
                "UPDATE students SET first_name = $1, last_name = $2, email = $3, \
                 class_id = $4 WHERE id = $5",
            )
            .bind(&row.first_name)
            .bind(&row.last_name)
            .bind(&row.email)
            .bind(row.class_id)
            .bind(patch.id)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await.map_err(BulkError::Commit)
    }
}
