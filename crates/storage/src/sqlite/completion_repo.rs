use lesson_core::LessonKind;
use lesson_core::model::QuizScore;
use sqlx::Row;

use super::SqliteRepository;
use super::mapping::{parse_lesson, ser, u32_from_i64};
use crate::repository::{CompletionRecord, CompletionRepository, StorageError};

fn map_completion_row(row: &sqlx::sqlite::SqliteRow) -> Result<CompletionRecord, StorageError> {
    let lesson = parse_lesson(&row.try_get::<String, _>("lesson").map_err(ser)?)?;
    let correct = u32_from_i64("correct", row.try_get::<i64, _>("correct").map_err(ser)?)?;
    let total = u32_from_i64("total", row.try_get::<i64, _>("total").map_err(ser)?)?;
    let passed: bool = row.try_get("passed").map_err(ser)?;
    Ok(CompletionRecord {
        lesson,
        score: QuizScore { correct, total },
        passed,
        completed_at: row.try_get("completed_at").map_err(ser)?,
    })
}

#[async_trait::async_trait]
impl CompletionRepository for SqliteRepository {
    async fn append_completion(&self, record: &CompletionRecord) -> Result<i64, StorageError> {
        let res = sqlx::query(
            r"
                INSERT INTO lesson_completions (lesson, correct, total, passed, completed_at)
                VALUES (?1, ?2, ?3, ?4, ?5)
            ",
        )
        .bind(record.lesson.slug())
        .bind(i64::from(record.score.correct))
        .bind(i64::from(record.score.total))
        .bind(record.passed)
        .bind(record.completed_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(res.last_insert_rowid())
    }

    async fn list_completions(
        &self,
        lesson: LessonKind,
        limit: u32,
    ) -> Result<Vec<CompletionRecord>, StorageError> {
        let rows = sqlx::query(
            r"
                SELECT lesson, correct, total, passed, completed_at
                FROM lesson_completions
                WHERE lesson = ?1
                ORDER BY completed_at DESC, id DESC
                LIMIT ?2
            ",
        )
        .bind(lesson.slug())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        rows.iter().map(map_completion_row).collect()
    }
}
