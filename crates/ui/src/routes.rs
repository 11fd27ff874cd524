use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};
use lesson_core::LessonKind;

use crate::views::{HomeView, LessonView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/lesson/:slug", LessonView)] Lesson { slug: String },
}

impl Route {
    #[must_use]
    pub fn lesson(kind: LessonKind) -> Self {
        Route::Lesson {
            slug: kind.slug().to_string(),
        }
    }
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    rsx! {
        nav { class: "sidebar",
            h1 { "Lessons" }
            ul {
                li { Link { to: Route::Home {}, "All lessons" } }
                for kind in LessonKind::ALL {
                    li { key: "{kind.slug()}",
                        Link { to: Route::lesson(kind), "{kind.content().title}" }
                    }
                }
            }
        }
    }
}
