use std::fmt;

use chrono::{DateTime, Utc};
use lesson_core::{LessonKind, LessonState, Phase, gate};
use storage::repository::{CompletionRecord, ProgressRecord, Storage};

#[derive(Debug, Clone)]
struct Args {
    db_url: String,
    lesson: LessonKind,
    phase: Phase,
    now: Option<DateTime<Utc>>,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidLesson { raw: String },
    InvalidPhase { raw: String },
    InvalidDbUrl { raw: String },
    InvalidNow { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidLesson { raw } => write!(f, "invalid --lesson value: {raw}"),
            ArgsError::InvalidPhase { raw } => write!(f, "invalid --phase value: {raw}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidNow { raw } => {
                write!(f, "invalid --now value (expected RFC3339): {raw}")
            }
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

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut db_url =
            std::env::var("LESSON_DB_URL").unwrap_or_else(|_| "sqlite:dev.sqlite3".into());
        let mut lesson = std::env::var("LESSON_KIND")
            .ok()
            .and_then(|value| value.parse::<LessonKind>().ok())
            .unwrap_or(LessonKind::SolarCells);
        let mut phase = Phase::Transfer;
        let mut now: Option<DateTime<Utc>> = None;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = value;
                }
                "--lesson" => {
                    let value = require_value(&mut args, "--lesson")?;
                    lesson = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidLesson { raw: value.clone() })?;
                }
                "--phase" => {
                    let value = require_value(&mut args, "--phase")?;
                    phase = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidPhase { raw: value.clone() })?;
                }
                "--now" => {
                    let value = require_value(&mut args, "--now")?;
                    let parsed = DateTime::parse_from_rfc3339(&value)
                        .map_err(|_| ArgsError::InvalidNow { raw: value.clone() })?
                        .with_timezone(&Utc);
                    now = Some(parsed);
                }
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
            phase,
            now,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url>         SQLite URL (default: sqlite:dev.sqlite3)");
    eprintln!("  --lesson <slug>           solar_cells or seismic_waves (default: solar_cells)");
    eprintln!("  --phase <tag>             Phase to leave the learner on (default: transfer)");
    eprintln!("  --now <rfc3339>           Fixed current time for deterministic seeding");
    eprintln!("  -h, --help                Show this help");
    eprintln!();
    eprintln!("Environment (same as flags):");
    eprintln!("  LESSON_DB_URL, LESSON_KIND");
}

/// Walk a fresh lesson forward with correct answers until `target` is reached.
fn walk_to(lesson: LessonKind, target: Phase) -> Result<LessonState, Box<dyn std::error::Error>> {
    let content = lesson.content();
    let mut state = LessonState::new(content);
    while state.phase() < target {
        match state.phase() {
            Phase::Predict => state.select_prediction(content, content.prediction.correct)?,
            Phase::Play | Phase::TwistPlay => state.mark_touched()?,
            Phase::TwistPredict => state.select_twist_prediction(content, content.twist.correct)?,
            Phase::Transfer => {
                for index in 0..content.applications.len() {
                    state.open_application(content, index)?;
                }
            }
            Phase::Test => {
                for (question, q) in content.questions.iter().enumerate() {
                    state.select_answer(content, question, q.correct)?;
                }
                state.submit_test(content)?;
            }
            _ => {}
        }
        if !gate(&state, content).is_open() {
            break;
        }
        let Some(next) = state.phase().next() else {
            break;
        };
        state.set_phase(next);
    }
    Ok(state)
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let storage = Storage::sqlite(&args.db_url).await?;
    let now = args.now.unwrap_or_else(Utc::now);

    let state = walk_to(args.lesson, args.phase)?;
    let record = ProgressRecord {
        lesson: args.lesson,
        state_json: state.to_saved().to_json()?,
        updated_at: now,
    };
    storage.progress.save_progress(&record).await?;

    if let Some(score) = state.score() {
        storage
            .completions
            .append_completion(&CompletionRecord {
                lesson: args.lesson,
                score,
                passed: state.passed(args.lesson.content()),
                completed_at: now,
            })
            .await?;
    }

    println!(
        "Seeded {} at phase {} into {}",
        args.lesson,
        state.phase(),
        args.db_url
    );

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
