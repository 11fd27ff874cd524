use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use lesson_core::settings::DEFAULT_DEBOUNCE_MS;
use lesson_core::{LessonKind, LessonSettings};
use services::{AppServices, Clock, ProgressService};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidLesson { raw: String },
    InvalidDebounce { raw: String },
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidLesson { raw } => write!(f, "invalid --lesson value: {raw}"),
            ArgsError::InvalidDebounce { raw } => write!(f, "invalid --debounce-ms value: {raw}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    progress: Arc<ProgressService>,
    settings: LessonSettings,
    launch_lesson: Option<LessonKind>,
    resume_saved: bool,
}

impl UiApp for DesktopApp {
    fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    fn lesson_settings(&self) -> LessonSettings {
        self.settings
    }

    fn launch_lesson(&self) -> Option<LessonKind> {
        self.launch_lesson
    }

    fn resume_saved(&self) -> bool {
        self.resume_saved
    }
}

struct Args {
    db_url: String,
    lesson: Option<LessonKind>,
    resume_saved: bool,
    settings: LessonSettings,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!(
        "  cargo run -p app -- [--db <sqlite_url>] [--lesson <slug>] [--no-resume] \
         [--debounce-ms <ms>] [--no-dot-nav]"
    );
    eprintln!();
    eprintln!("Lessons:");
    for kind in LessonKind::ALL {
        eprintln!("  {}  {}", kind.slug(), kind.content().title);
    }
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite:lessons.sqlite3");
    eprintln!("  --debounce-ms {DEFAULT_DEBOUNCE_MS}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  LESSON_DB_URL, LESSON_KIND, RUST_LOG");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("LESSON_DB_URL")
            .ok()
            .map_or_else(|| normalize_sqlite_url("lessons.sqlite3".into()), normalize_sqlite_url);
        let mut lesson = std::env::var("LESSON_KIND")
            .ok()
            .and_then(|value| value.parse::<LessonKind>().ok());
        let mut resume_saved = true;
        let mut debounce_ms = DEFAULT_DEBOUNCE_MS;
        let mut dot_navigation = true;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--lesson" => {
                    let value = require_value(args, "--lesson")?;
                    let parsed = value
                        .parse::<LessonKind>()
                        .map_err(|_| ArgsError::InvalidLesson { raw: value.clone() })?;
                    lesson = Some(parsed);
                }
                "--debounce-ms" => {
                    let value = require_value(args, "--debounce-ms")?;
                    debounce_ms = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidDebounce { raw: value.clone() })?;
                }
                "--no-resume" => resume_saved = false,
                "--no-dot-nav" => dot_navigation = false,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            lesson,
            resume_saved,
            settings: LessonSettings::new(debounce_ms, dot_navigation),
        })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // Open + migrate SQLite before the window exists.
    prepare_sqlite_file(&parsed.db_url)?;
    let services = AppServices::new_sqlite(&parsed.db_url, Clock::default_clock()).await?;
    tracing::info!(
        db = %parsed.db_url,
        lesson = ?parsed.lesson,
        resume = parsed.resume_saved,
        "storage ready"
    );

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        progress: services.progress(),
        settings: parsed.settings,
        launch_lesson: parsed.lesson,
        resume_saved: parsed.resume_saved,
    });
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Micro-Lessons")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
