//! Static lesson copy, question banks and application tabs.

mod seismic;
mod solar;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::{
    ExperimentControls, PassThreshold, QuizQuestion, SeismicControls, SolarControls,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LessonKindError {
    #[error("unknown lesson: {0}")]
    Unknown(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LessonKind {
    SolarCells,
    SeismicWaves,
}

impl LessonKind {
    pub const ALL: [LessonKind; 2] = [LessonKind::SolarCells, LessonKind::SeismicWaves];

    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            LessonKind::SolarCells => "solar_cells",
            LessonKind::SeismicWaves => "seismic_waves",
        }
    }

    #[must_use]
    pub fn content(self) -> &'static LessonContent {
        match self {
            LessonKind::SolarCells => &solar::CONTENT,
            LessonKind::SeismicWaves => &seismic::CONTENT,
        }
    }

    #[must_use]
    pub fn default_controls(self) -> ExperimentControls {
        match self {
            LessonKind::SolarCells => ExperimentControls::Solar(SolarControls::default()),
            LessonKind::SeismicWaves => ExperimentControls::Seismic(SeismicControls::default()),
        }
    }
}

impl fmt::Display for LessonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for LessonKind {
    type Err = LessonKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.slug() == normalized)
            .ok_or_else(|| LessonKindError::Unknown(s.to_string()))
    }
}

/// A single-answer prompt used for the predict and twist-predict phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub prompt: &'static str,
    pub options: &'static [&'static str],
    pub correct: usize,
}

impl Choice {
    #[must_use]
    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct
    }
}

/// One real-world application tab in the transfer phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Application {
    pub title: &'static str,
    pub description: &'static str,
    pub stats: &'static [(&'static str, &'static str)],
}

#[derive(Debug, PartialEq, Eq)]
pub struct LessonContent {
    pub kind: LessonKind,
    pub title: &'static str,
    pub tagline: &'static str,
    pub hook: &'static [&'static str],
    pub prediction: Choice,
    pub play_intro: &'static str,
    pub review: &'static [&'static str],
    pub twist: Choice,
    pub twist_play_intro: &'static str,
    pub twist_review: &'static [&'static str],
    pub applications: &'static [Application],
    pub questions: &'static [QuizQuestion],
    pub pass_threshold: PassThreshold,
    pub mastery: &'static [&'static str],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_parse_back() {
        for kind in LessonKind::ALL {
            assert_eq!(kind.slug().parse::<LessonKind>().unwrap(), kind);
            assert_eq!(kind.content().kind, kind);
        }
        assert_eq!("Solar-Cells".parse::<LessonKind>().unwrap(), LessonKind::SolarCells);
        assert!("tides".parse::<LessonKind>().is_err());
    }

    #[test]
    fn content_is_consistent() {
        for kind in LessonKind::ALL {
            let content = kind.content();
            assert_eq!(content.applications.len(), 4);
            assert_eq!(content.questions.len(), 10);
            assert!(content.prediction.correct < content.prediction.options.len());
            assert!(content.twist.correct < content.twist.options.len());
            for q in content.questions {
                assert!(q.correct < q.options.len(), "bad key for {}", q.prompt);
            }
        }
    }
}
