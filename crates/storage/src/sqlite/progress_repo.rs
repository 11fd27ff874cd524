use lesson_core::LessonKind;
use sqlx::Row;

use super::SqliteRepository;
use super::mapping::{parse_lesson, ser};
use crate::repository::{ProgressRecord, ProgressRepository, StorageError};

fn map_progress_row(row: &sqlx::sqlite::SqliteRow) -> Result<ProgressRecord, StorageError> {
    let lesson = parse_lesson(&row.try_get::<String, _>("lesson").map_err(ser)?)?;
    Ok(ProgressRecord {
        lesson,
        state_json: row.try_get("state_json").map_err(ser)?,
        updated_at: row.try_get("updated_at").map_err(ser)?,
    })
}

#[async_trait::async_trait]
impl ProgressRepository for SqliteRepository {
    async fn save_progress(&self, record: &ProgressRecord) -> Result<(), StorageError> {
        sqlx::query(
            r"
                INSERT INTO lesson_progress (lesson, state_json, updated_at)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(lesson) DO UPDATE SET
                    state_json = excluded.state_json,
                    updated_at = excluded.updated_at
            ",
        )
        .bind(record.lesson.slug())
        .bind(&record.state_json)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(())
    }

    async fn load_progress(
        &self,
        lesson: LessonKind,
    ) -> Result<Option<ProgressRecord>, StorageError> {
        let row = sqlx::query(
            r"
                SELECT lesson, state_json, updated_at
                FROM lesson_progress
                WHERE lesson = ?1
            ",
        )
        .bind(lesson.slug())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        row.as_ref().map(map_progress_row).transpose()
    }

    async fn delete_progress(&self, lesson: LessonKind) -> Result<(), StorageError> {
        let res = sqlx::query("DELETE FROM lesson_progress WHERE lesson = ?1")
            .bind(lesson.slug())
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}
