use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use lesson_core::time::fixed_clock;
use lesson_core::{LessonKind, LessonSettings};
use services::ProgressService;
use storage::repository::Storage;

use crate::context::{UiApp, build_app_context};
use crate::views::{HomeView, LessonView};

#[derive(Clone)]
struct TestApp {
    progress: Arc<ProgressService>,
    launch_lesson: Option<LessonKind>,
}

impl UiApp for TestApp {
    fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    fn lesson_settings(&self) -> LessonSettings {
        LessonSettings::default()
    }

    fn launch_lesson(&self) -> Option<LessonKind> {
        self.launch_lesson
    }

    fn resume_saved(&self) -> bool {
        true
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Lesson(String),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Lesson(slug) => rsx! { LessonView { slug } },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
    pub progress: Arc<ProgressService>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuild, then let resources settle over a few async turns.
    pub async fn settle(&mut self) {
        self.rebuild();
        for _ in 0..3 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Harness over fresh in-memory storage.
///
/// The storage handle is returned so tests can seed progress before the
/// first render.
pub fn setup_view_harness(view: ViewKind) -> ViewHarness {
    setup_view_harness_with_storage(view, Storage::in_memory())
}

pub fn setup_view_harness_with_storage(view: ViewKind, storage: Storage) -> ViewHarness {
    let progress = Arc::new(ProgressService::new(
        fixed_clock(),
        Arc::clone(&storage.progress),
        Arc::clone(&storage.completions),
    ));

    let app = Arc::new(TestApp {
        progress: Arc::clone(&progress),
        launch_lesson: None,
    });
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });

    ViewHarness {
        dom,
        storage,
        progress,
    }
}
