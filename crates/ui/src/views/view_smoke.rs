use std::sync::Arc;

use lesson_core::model::QuizScore;
use lesson_core::{LessonKind, LessonState, Phase};
use storage::repository::{
    InMemoryRepository, ProgressRecord, ProgressRepository, Storage, StorageError,
};

use super::test_harness::{ViewKind, setup_view_harness, setup_view_harness_with_storage};

fn saved_at(kind: LessonKind, phase: Phase) -> lesson_core::SavedLessonState {
    let content = kind.content();
    let mut state = LessonState::new(content);
    if phase != Phase::Hook {
        state.set_phase(phase);
    }
    state.to_saved()
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_lists_both_lessons() {
    let mut harness = setup_view_harness(ViewKind::Home);
    harness.settle().await;
    let html = harness.render();
    assert!(
        html.contains("Solar Cells as Light Detectors"),
        "missing solar card in {html}"
    );
    assert!(html.contains("P-Waves vs S-Waves"), "missing seismic card in {html}");
    assert!(html.contains("Begin"), "missing begin link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_shows_resume_and_last_result() {
    let mut harness = setup_view_harness(ViewKind::Home);
    harness
        .progress
        .save(&saved_at(LessonKind::SeismicWaves, Phase::Predict))
        .await
        .expect("save progress");
    harness
        .progress
        .record_completion(
            LessonKind::SeismicWaves,
            QuizScore {
                correct: 6,
                total: 10,
            },
            false,
        )
        .await
        .expect("record completion");

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Resume at Predict"), "missing resume label in {html}");
    assert!(
        html.contains("Last test: 6/10 (not passed)"),
        "missing last result in {html}"
    );
    assert!(html.contains("Continue"), "missing continue link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_view_smoke_renders_hook_and_dots() {
    let mut harness = setup_view_harness(ViewKind::Lesson("solar_cells".to_string()));
    harness.settle().await;
    let html = harness.render();
    assert!(
        html.contains("Solar Cells as Light Detectors"),
        "missing title in {html}"
    );
    assert!(html.contains("Step 1 of 10"), "missing step label in {html}");
    assert!(html.contains("dot dot--current"), "missing current dot in {html}");
    assert!(html.contains("Start"), "missing start button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_view_smoke_resumes_at_saved_phase() {
    let mut harness = setup_view_harness(ViewKind::Lesson("seismic_waves".to_string()));
    harness
        .progress
        .save(&saved_at(LessonKind::SeismicWaves, Phase::Predict))
        .await
        .expect("save progress");

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Step 2 of 10"), "missing step label in {html}");
    assert!(
        html.contains("Which wave do you think reaches a distant seismometer first?"),
        "missing prediction prompt in {html}"
    );
    assert!(
        html.contains("Make a prediction to continue"),
        "missing gate hint in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_view_smoke_rejects_unknown_slug() {
    let mut harness = setup_view_harness(ViewKind::Lesson("tides".to_string()));
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Lesson not found"), "missing not-found in {html}");
    assert!(html.contains("Back to lessons"), "missing home link in {html}");
}

struct FailingProgressRepo;

#[async_trait::async_trait]
impl ProgressRepository for FailingProgressRepo {
    async fn save_progress(&self, _record: &ProgressRecord) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn load_progress(
        &self,
        _lesson: LessonKind,
    ) -> Result<Option<ProgressRecord>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn delete_progress(&self, _lesson: LessonKind) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_error_state() {
    let storage = Storage {
        progress: Arc::new(FailingProgressRepo),
        completions: Arc::new(InMemoryRepository::new()),
    };
    let mut harness = setup_view_harness_with_storage(ViewKind::Home, storage);
    harness.settle().await;
    let html = harness.render();
    assert!(
        html.contains("Something went wrong loading your progress"),
        "missing error in {html}"
    );
    assert!(html.contains("Retry"), "missing retry in {html}");
}
