use lesson_core::{LessonKind, Phase, SavedLessonState};
use services::CompletionRecord;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonCardVm {
    pub kind: LessonKind,
    pub slug: &'static str,
    pub title: &'static str,
    pub tagline: &'static str,
    pub resume_label: Option<String>,
    pub last_result: Option<String>,
}

/// Build the home card for a lesson from its saved progress and latest result.
#[must_use]
pub fn map_lesson_card(
    kind: LessonKind,
    saved: Option<&SavedLessonState>,
    latest: Option<&CompletionRecord>,
) -> LessonCardVm {
    let content = kind.content();
    let resume_label = saved
        .and_then(|saved| saved.phase.parse::<Phase>().ok())
        .filter(|phase| !phase.is_first())
        .map(|phase| format!("Resume at {}", phase.label()));
    let last_result = latest.map(|record| {
        let verdict = if record.passed { "passed" } else { "not passed" };
        format!(
            "Last test: {}/{} ({verdict})",
            record.score.correct, record.score.total
        )
    });
    LessonCardVm {
        kind,
        slug: kind.slug(),
        title: content.title,
        tagline: content.tagline,
        resume_label,
        last_result,
    }
}
