use chrono::Duration;
use lesson_core::model::QuizScore;
use lesson_core::time::fixed_now;
use lesson_core::{LessonKind, LessonState};
use storage::repository::{
    CompletionRecord, CompletionRepository, ProgressRecord, ProgressRepository, Storage,
    StorageError,
};
use storage::sqlite::SqliteRepository;

async fn connect(name: &str) -> SqliteRepository {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let repo = SqliteRepository::connect(&url).await.expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

#[tokio::test]
async fn sqlite_progress_upserts_and_deletes() {
    let repo = connect("memdb_progress").await;
    let content = LessonKind::SeismicWaves.content();
    let state = LessonState::new(content);
    let json = state.to_saved().to_json().unwrap();

    let mut record = ProgressRecord {
        lesson: LessonKind::SeismicWaves,
        state_json: json.clone(),
        updated_at: fixed_now(),
    };
    repo.save_progress(&record).await.unwrap();

    record.state_json = r#"{"phase":"predict"}"#.to_string();
    record.updated_at = fixed_now() + Duration::minutes(3);
    repo.save_progress(&record).await.unwrap();

    let loaded = repo
        .load_progress(LessonKind::SeismicWaves)
        .await
        .unwrap()
        .expect("saved row");
    assert_eq!(loaded, record);
    assert!(
        repo.load_progress(LessonKind::SolarCells)
            .await
            .unwrap()
            .is_none()
    );

    repo.delete_progress(LessonKind::SeismicWaves).await.unwrap();
    let err = repo
        .delete_progress(LessonKind::SeismicWaves)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound));
}

#[tokio::test]
async fn sqlite_completions_are_listed_newest_first() {
    let repo = connect("memdb_completions").await;
    for (minutes, correct) in [(0, 4), (10, 8), (5, 6)] {
        repo.append_completion(&CompletionRecord {
            lesson: LessonKind::SolarCells,
            score: QuizScore { correct, total: 10 },
            passed: correct >= 7,
            completed_at: fixed_now() + Duration::minutes(minutes),
        })
        .await
        .unwrap();
    }
    repo.append_completion(&CompletionRecord {
        lesson: LessonKind::SeismicWaves,
        score: QuizScore {
            correct: 10,
            total: 10,
        },
        passed: true,
        completed_at: fixed_now(),
    })
    .await
    .unwrap();

    let items = repo
        .list_completions(LessonKind::SolarCells, 5)
        .await
        .unwrap();
    let scores: Vec<u32> = items.iter().map(|r| r.score.correct).collect();
    assert_eq!(scores, vec![8, 6, 4]);
    assert!(items[0].passed);
    assert!(!items[1].passed);
}

#[tokio::test]
async fn sqlite_migrations_are_idempotent() {
    let repo = connect("memdb_migrate_twice").await;
    repo.migrate().await.expect("second migrate");

    let storage = Storage::sqlite("sqlite:file:memdb_migrate_twice?mode=memory&cache=shared")
        .await
        .expect("storage");
    assert!(
        storage
            .progress
            .load_progress(LessonKind::SolarCells)
            .await
            .unwrap()
            .is_none()
    );
}
