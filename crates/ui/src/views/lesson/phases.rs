use dioxus::prelude::*;
use lesson_core::{Choice, LessonState, Phase};

use crate::vm::{LessonIntent, LessonVm, WaveFrameVm};

use super::lab::{SeismicLab, SolarLab};

/// Renders the body of whichever phase the lesson is in.
#[component]
pub(super) fn PhaseBody(
    state: LessonState,
    vm: LessonVm,
    frame: Option<WaveFrameVm>,
    on_intent: Callback<LessonIntent>,
) -> Element {
    let content = state.kind().content();
    match state.phase() {
        Phase::Hook => rsx! {
            p { class: "tagline", "{content.tagline}" }
            Paragraphs { lines: content.hook }
        },
        Phase::Predict => rsx! {
            ChoicePanel {
                choice: content.prediction,
                selected: state.prediction(),
                on_select: move |choice| on_intent.call(LessonIntent::Predict(choice)),
            }
        },
        Phase::Play | Phase::TwistPlay => {
            let twist = state.phase() == Phase::TwistPlay;
            let intro = if twist {
                content.twist_play_intro
            } else {
                content.play_intro
            };
            rsx! {
                p { class: "lab-intro", "{intro}" }
                if let Some(readout) = vm.solar.clone() {
                    SolarLab { readout, twist, on_intent }
                }
                if let (Some(readout), Some(frame)) = (vm.seismic.clone(), frame) {
                    SeismicLab { readout, frame, twist, on_intent }
                }
            }
        }
        Phase::Review => rsx! {
            PredictionRecap { choice: content.prediction, selected: state.prediction() }
            Bullets { lines: content.review }
        },
        Phase::TwistPredict => rsx! {
            ChoicePanel {
                choice: content.twist,
                selected: state.twist_prediction(),
                on_select: move |choice| on_intent.call(LessonIntent::TwistPredict(choice)),
            }
        },
        Phase::TwistReview => rsx! {
            PredictionRecap { choice: content.twist, selected: state.twist_prediction() }
            Bullets { lines: content.twist_review }
        },
        Phase::Transfer => rsx! {
            Transfer { state, on_intent }
        },
        Phase::Test => rsx! {
            Quiz { state, vm, on_intent }
        },
        Phase::Mastery => rsx! {
            Mastery { content_lines: content.mastery, vm, on_intent }
        },
    }
}

#[component]
fn Paragraphs(lines: &'static [&'static str]) -> Element {
    rsx! {
        for line in lines.iter() {
            p { "{line}" }
        }
    }
}

#[component]
fn Bullets(lines: &'static [&'static str]) -> Element {
    rsx! {
        ul { class: "bullets",
            for line in lines.iter() {
                li { "{line}" }
            }
        }
    }
}

#[component]
fn ChoicePanel(choice: Choice, selected: Option<usize>, on_select: Callback<usize>) -> Element {
    rsx! {
        div { class: "choice-panel",
            h3 { "{choice.prompt}" }
            div { class: "choice-options",
                for (index, option) in choice.options.iter().enumerate() {
                    button {
                        key: "{index}",
                        class: if selected == Some(index) { "choice choice--selected" } else { "choice" },
                        onclick: move |_| on_select.call(index),
                        "{option}"
                    }
                }
            }
            if selected.is_some() {
                p { class: "choice-note", "Prediction saved. Let's find out." }
            }
        }
    }
}

#[component]
fn PredictionRecap(choice: Choice, selected: Option<usize>) -> Element {
    let answer = choice.options.get(choice.correct).copied().unwrap_or_default();
    let picked = selected.and_then(|i| choice.options.get(i).copied());
    let verdict = match selected {
        Some(i) if choice.is_correct(i) => "Your prediction was right.",
        Some(_) => "Your prediction missed. Most people guess the same way.",
        None => "",
    };
    rsx! {
        div { class: "recap",
            if let Some(picked) = picked {
                p { "You predicted: {picked}" }
            }
            p { "Answer: {answer}" }
            if !verdict.is_empty() {
                p { class: "recap-verdict", "{verdict}" }
            }
        }
    }
}

#[component]
fn Transfer(state: LessonState, on_intent: Callback<LessonIntent>) -> Element {
    let content = state.kind().content();
    let explored = state.completed_apps().len();
    let total = content.applications.len();
    let active = content.applications.get(state.active_app()).copied();
    let opened_any = explored > 0;
    rsx! {
        p { class: "transfer-count", "Explored {explored} of {total}" }
        div { class: "app-tabs",
            for (index, app) in content.applications.iter().enumerate() {
                button {
                    key: "{index}",
                    class: if opened_any && state.active_app() == index { "tab tab--active" } else { "tab" },
                    onclick: move |_| on_intent.call(LessonIntent::OpenApplication(index)),
                    if state.completed_apps().contains(&index) { "✓ " }
                    "{app.title}"
                }
            }
        }
        if let Some(app) = active.filter(|_| opened_any) {
            article { class: "app-detail",
                h3 { "{app.title}" }
                p { "{app.description}" }
                dl {
                    for (label, value) in app.stats.iter() {
                        dt { "{label}" }
                        dd { "{value}" }
                    }
                }
            }
        } else {
            p { class: "app-detail-empty", "Open each application to see where this shows up." }
        }
    }
}

#[component]
fn Quiz(state: LessonState, vm: LessonVm, on_intent: Callback<LessonIntent>) -> Element {
    let content = state.kind().content();
    let submitted = vm.quiz.submitted;
    rsx! {
        p { class: "quiz-progress", "Answered {vm.quiz.answered} of {vm.quiz.total}" }
        ol { class: "quiz",
            for (question, q) in content.questions.iter().enumerate() {
                li { key: "{question}",
                    p { class: "quiz-prompt", "{q.prompt}" }
                    div { class: "quiz-options",
                        for (option, text) in q.options.iter().enumerate() {
                            button {
                                key: "{option}",
                                class: option_class(&state, question, option, q.correct, submitted),
                                disabled: submitted,
                                onclick: move |_| on_intent.call(LessonIntent::Answer { question, option }),
                                "{text}"
                            }
                        }
                    }
                    if submitted {
                        p { class: "quiz-explanation", "{q.explanation}" }
                    }
                }
            }
        }
        if let Some(text) = vm.quiz.result_text.as_ref() {
            p { class: "quiz-result", "{text}" }
        }
        if !submitted {
            button {
                id: "quiz-submit",
                class: "primary",
                disabled: !vm.quiz.can_submit,
                onclick: move |_| on_intent.call(LessonIntent::Submit),
                "Submit answers"
            }
        } else if vm.quiz.passed == Some(false) {
            button {
                id: "quiz-retry",
                onclick: move |_| on_intent.call(LessonIntent::Retry),
                "Try again"
            }
        }
    }
}

fn option_class(
    state: &LessonState,
    question: usize,
    option: usize,
    correct: usize,
    submitted: bool,
) -> &'static str {
    let chosen = state.answers().get(question) == Some(option);
    match (submitted, chosen, option == correct) {
        (true, _, true) => "choice choice--correct",
        (true, true, false) => "choice choice--wrong",
        (false, true, _) => "choice choice--selected",
        _ => "choice",
    }
}

#[component]
fn Mastery(
    content_lines: &'static [&'static str],
    vm: LessonVm,
    on_intent: Callback<LessonIntent>,
) -> Element {
    let heading = if vm.quiz.passed == Some(true) {
        "Mastery achieved"
    } else {
        "Lesson finished"
    };
    rsx! {
        h3 { "{heading}" }
        if let Some(text) = vm.quiz.result_text.as_ref() {
            p { class: "quiz-result", "{text}" }
        }
        Bullets { lines: content_lines }
        button {
            id: "lesson-reset",
            onclick: move |_| on_intent.call(LessonIntent::Reset),
            "Review Again"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lesson_core::{LessonContent, LessonKind};

    #[test]
    fn option_class_marks_correct_after_submit() {
        let content: &LessonContent = LessonKind::SolarCells.content();
        let mut state = LessonState::new(content);
        state.set_phase(Phase::Test);
        state.select_answer(content, 0, 1).unwrap();

        assert_eq!(option_class(&state, 0, 1, 0, false), "choice choice--selected");
        assert_eq!(option_class(&state, 0, 0, 0, false), "choice");
        assert_eq!(option_class(&state, 0, 1, 0, true), "choice choice--wrong");
        assert_eq!(option_class(&state, 0, 0, 0, true), "choice choice--correct");
    }
}
