use dioxus::prelude::*;
use dioxus_router::Router;

use crate::routes::Route;

#[component]
pub fn App() -> Element {
    rsx! {
        document::Title { "Micro-Lessons" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    FatalError { report: format!("{errors:?}") }
                },
                Router::<Route> {}
            }
        }
    }
}

/// Last-resort screen when a view panics or bubbles an error up.
///
/// Lesson progress is saved after every change, so restarting loses at most
/// the interaction that failed.
#[component]
fn FatalError(report: String) -> Element {
    tracing::error!(%report, "view error boundary tripped");
    rsx! {
        div { class: "fatal",
            h1 { "Something went wrong" }
            p { "Restart the app to pick the lesson up where you left off." }
            details {
                summary { "Details" }
                pre { "{report}" }
            }
        }
    }
}
