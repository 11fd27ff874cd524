use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use lesson_core::LessonKind;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{LessonCardVm, map_lesson_card};

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();

    let launch_ctx = ctx.clone();
    use_effect(move || {
        if let Some(kind) = launch_ctx.take_launch_lesson() {
            navigator.replace(Route::lesson(kind));
        }
    });

    let progress = ctx.progress();
    let mut resource = use_resource(move || {
        let progress = progress.clone();
        async move {
            let mut cards = Vec::with_capacity(LessonKind::ALL.len());
            for kind in LessonKind::ALL {
                let saved = progress.load(kind).await?;
                let latest = progress.history(kind, 1).await?;
                cards.push(map_lesson_card(kind, saved.as_ref(), latest.first()));
            }
            Ok::<_, ViewError>(cards)
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            h2 { "Lessons" }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(cards) => rsx! {
                    ul { class: "lesson-cards",
                        for card in cards {
                            LessonCard { key: "{card.slug}", card }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    button { onclick: move |_| resource.restart(), "Retry" }
                },
            }
        }
    }
}

#[component]
fn LessonCard(card: LessonCardVm) -> Element {
    let action = if card.resume_label.is_some() { "Continue" } else { "Begin" };
    rsx! {
        li { class: "lesson-card",
            h3 { "{card.title}" }
            p { class: "lesson-card-tagline", "{card.tagline}" }
            if let Some(label) = card.resume_label.as_ref() {
                p { class: "lesson-card-resume", "{label}" }
            }
            if let Some(result) = card.last_result.as_ref() {
                p { class: "lesson-card-result", "{result}" }
            }
            Link { class: "button", to: Route::lesson(card.kind), "{action}" }
        }
    }
}
