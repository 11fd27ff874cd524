use std::sync::Arc;
use std::time::Duration;

use dioxus::core::Task;
use dioxus::prelude::*;
use dioxus_router::Link;
use lesson_core::physics::WaveAnimation;
use lesson_core::{LessonEvent, LessonKind, QuizScore};
use services::{
    LessonObserver, LessonSession, ProgressService, ProgressWriter, RecordingObserver,
};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{LessonIntent, LessonVm, apply_intent, wave_frame};

use super::phases::PhaseBody;

/// Wave diagram frame interval (~60 fps).
const FRAME: Duration = Duration::from_millis(16);

#[component]
pub fn LessonView(slug: String) -> Element {
    let Ok(kind) = slug.parse::<LessonKind>() else {
        return rsx! {
            div { class: "page",
                h2 { "Lesson not found" }
                p { "There is no lesson called \"{slug}\"." }
                Link { to: Route::Home {}, "Back to lessons" }
            }
        };
    };
    rsx! {
        LessonPage { key: "{kind.slug()}", kind }
    }
}

#[component]
fn LessonPage(kind: LessonKind) -> Element {
    let ctx = use_context::<AppContext>();
    let observer = use_hook(|| Arc::new(RecordingObserver::new()));
    let writer = use_hook(|| ProgressWriter::new(ctx.progress()));
    let session = use_signal(|| None::<LessonSession>);
    let animation = use_signal(WaveAnimation::new);
    let ticker = use_signal(|| None::<Task>);

    let resource = {
        let progress = ctx.progress();
        let settings = ctx.lesson_settings();
        let resume = ctx.resume_saved();
        let observer = Arc::clone(&observer);
        use_resource(move || {
            let progress = progress.clone();
            let observer: Arc<dyn LessonObserver> = observer.clone();
            let mut session = session;
            async move {
                let opened = progress
                    .open_session(kind, settings, resume)
                    .await?;
                session.set(Some(opened.with_observer(observer)));
                Ok::<_, ViewError>(())
            }
        })
    };

    let dispatch = {
        let observer = Arc::clone(&observer);
        let progress = ctx.progress();
        let writer = writer.clone();
        use_callback(move |intent: LessonIntent| {
            let mut session = session;
            let mut animation = animation;
            let mut ticker = ticker;
            let changed = session
                .write()
                .as_mut()
                .is_some_and(|current| apply_intent(current, intent));
            if !changed {
                return;
            }
            match intent {
                LessonIntent::SendWave => {
                    animation.write().start();
                    // frames only run while a wave is in flight
                    let task = spawn(run_frames(move |dt| animation.write().tick(dt)));
                    if let Some(previous) = ticker.write().replace(task) {
                        previous.cancel();
                    }
                }
                LessonIntent::WaveType(_) | LessonIntent::Medium(_) | LessonIntent::Reset => {
                    animation.write().reset();
                    if let Some(previous) = ticker.write().take() {
                        previous.cancel();
                    }
                }
                _ => {}
            }
            persist(&observer, &progress, &writer, kind);
        })
    };

    let on_key = move |evt: KeyboardEvent| match evt.data.key() {
        Key::ArrowLeft => dispatch.call(LessonIntent::Back),
        Key::ArrowRight => dispatch.call(LessonIntent::Next),
        _ => {}
    };

    let load_state = view_state_from_resource(&resource);
    let current = session.read().clone();

    match (load_state, current) {
        (ViewState::Error(err), _) => rsx! {
            div { class: "page",
                p { "{err.message()}" }
                Link { to: Route::Home {}, "Back to lessons" }
            }
        },
        (_, None) => rsx! {
            div { class: "page",
                p { "Loading..." }
            }
        },
        (_, Some(current)) => {
            let vm = LessonVm::from_session(&current);
            let frame = current
                .state()
                .controls()
                .seismic()
                .map(|controls| wave_frame(controls, &animation.read()));
            rsx! {
                div {
                    id: "lesson-root",
                    class: "page lesson",
                    tabindex: "0",
                    onkeydown: on_key,
                    header { class: "lesson-header",
                        h2 { "{vm.title}" }
                        p { class: "lesson-step", "{vm.step_label}: {vm.phase_label}" }
                        ol { class: "progress-dots",
                            for dot in vm.dots.iter().copied() {
                                li { key: "{dot.phase}",
                                    button {
                                        class: dot.status.class(),
                                        title: dot.label,
                                        disabled: !dot.clickable,
                                        onclick: move |_| dispatch.call(LessonIntent::GoTo(dot.phase)),
                                        "{dot.phase.index() + 1}"
                                    }
                                }
                            }
                        }
                    }
                    section { class: "lesson-body",
                        PhaseBody {
                            state: current.state().clone(),
                            vm: vm.clone(),
                            frame,
                            on_intent: dispatch,
                        }
                    }
                    footer { class: "lesson-footer",
                        button {
                            id: "lesson-back",
                            disabled: !vm.back_enabled,
                            onclick: move |_| dispatch.call(LessonIntent::Back),
                            "Back"
                        }
                        if let Some(hint) = vm.next.hint.as_ref() {
                            span { class: "gate-hint", "{hint}" }
                        }
                        if vm.next.visible {
                            button {
                                id: "lesson-next",
                                class: "primary",
                                disabled: !vm.next.enabled,
                                onclick: move |_| dispatch.call(LessonIntent::Next),
                                "{vm.next.label}"
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Call `tick` once per frame until it reports the animation has stopped.
async fn run_frames(mut tick: impl FnMut(f64) -> bool) {
    loop {
        tokio::time::sleep(FRAME).await;
        if !tick(FRAME.as_secs_f64()) {
            break;
        }
    }
}

/// Forward buffered observer output to storage.
fn persist(
    observer: &RecordingObserver,
    progress: &Arc<ProgressService>,
    writer: &ProgressWriter,
    kind: LessonKind,
) {
    for event in observer.drain_events() {
        tracing::debug!(lesson = %kind, event = event.name(), "lesson event");
        if let LessonEvent::TestCompleted {
            correct,
            total,
            passed,
        } = event
        {
            let progress = Arc::clone(progress);
            spawn(async move {
                let score = QuizScore { correct, total };
                if let Err(err) = progress.record_completion(kind, score, passed).await {
                    tracing::warn!(lesson = %kind, error = %err, "failed to record completion");
                }
            });
        }
    }
    if let Some(snapshot) = observer.take_snapshot() {
        writer.submit(snapshot);
        let writer = writer.clone();
        spawn(async move {
            writer.flush().await;
        });
    }
}
