use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Wire value for an unanswered question.
pub const UNANSWERED: i64 = -1;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("question {question} is out of range (len {len})")]
    QuestionOutOfRange { question: usize, len: usize },

    #[error("option {option} is out of range for question {question}")]
    OptionOutOfRange { question: usize, option: usize },

    #[error("answers ({answers}) do not match question count ({questions})")]
    LengthMismatch { answers: usize, questions: usize },
}

//
// ─── QUESTIONS ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizQuestion {
    pub prompt: &'static str,
    pub options: &'static [&'static str],
    pub correct: usize,
    pub explanation: &'static str,
}

impl QuizQuestion {
    #[must_use]
    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct
    }
}

//
// ─── ANSWERS ──────────────────────────────────────────────────────────────────
//

/// Fixed-length answer vector, one slot per question.
///
/// Serialized as an integer array where `-1` marks an unanswered slot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuizAnswers {
    slots: Vec<Option<usize>>,
}

impl QuizAnswers {
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    #[must_use]
    pub fn from_slots(slots: Vec<Option<usize>>) -> Self {
        Self { slots }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[must_use]
    pub fn get(&self, question: usize) -> Option<usize> {
        self.slots.get(question).copied().flatten()
    }

    #[must_use]
    pub fn slots(&self) -> &[Option<usize>] {
        &self.slots
    }

    /// Record an answer after checking it against the question list.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` when the question or option index is out of range.
    pub fn select(
        &mut self,
        questions: &[QuizQuestion],
        question: usize,
        option: usize,
    ) -> Result<(), QuizError> {
        let len = self.slots.len();
        let Some(q) = questions.get(question) else {
            return Err(QuizError::QuestionOutOfRange { question, len });
        };
        if option >= q.options.len() {
            return Err(QuizError::OptionOutOfRange { question, option });
        }
        let Some(slot) = self.slots.get_mut(question) else {
            return Err(QuizError::QuestionOutOfRange { question, len });
        };
        *slot = Some(option);
        Ok(())
    }

    #[must_use]
    pub fn answered(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.slots.len() - self.answered()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.remaining() == 0
    }

    /// True when every answered slot points at a valid option.
    #[must_use]
    pub fn fits(&self, questions: &[QuizQuestion]) -> bool {
        self.slots.len() == questions.len()
            && self
                .slots
                .iter()
                .zip(questions)
                .all(|(slot, q)| slot.is_none_or(|opt| opt < q.options.len()))
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }
}

impl Serialize for QuizAnswers {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let wire: Vec<i64> = self
            .slots
            .iter()
            .map(|slot| slot.map_or(UNANSWERED, |v| i64::try_from(v).unwrap_or(UNANSWERED)))
            .collect();
        wire.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for QuizAnswers {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = Vec::<i64>::deserialize(deserializer)?;
        let slots = wire
            .into_iter()
            .map(|v| usize::try_from(v).ok())
            .collect();
        Ok(Self { slots })
    }
}

//
// ─── SCORING ──────────────────────────────────────────────────────────────────
//

/// Minimum fraction of correct answers needed to pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassThreshold {
    pub numerator: u32,
    pub denominator: u32,
}

impl PassThreshold {
    pub const SEVEN_OF_TEN: Self = Self {
        numerator: 7,
        denominator: 10,
    };

    #[must_use]
    pub fn is_met(self, correct: u32, total: u32) -> bool {
        u64::from(correct) * u64::from(self.denominator)
            >= u64::from(total) * u64::from(self.numerator)
    }

    /// Smallest number of correct answers that passes for `total` questions.
    #[must_use]
    pub fn required(self, total: u32) -> u32 {
        (0..=total)
            .find(|correct| self.is_met(*correct, total))
            .unwrap_or(total)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizScore {
    pub correct: u32,
    pub total: u32,
}

impl QuizScore {
    #[must_use]
    pub fn passed(self, threshold: PassThreshold) -> bool {
        threshold.is_met(self.correct, self.total)
    }

    #[must_use]
    pub fn percent(self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        self.correct * 100 / self.total
    }
}

/// Count matching answers. Unanswered slots count as wrong.
///
/// # Errors
///
/// Returns `QuizError::LengthMismatch` when the answer vector does not cover
/// the question list exactly.
pub fn score(questions: &[QuizQuestion], answers: &QuizAnswers) -> Result<QuizScore, QuizError> {
    if answers.len() != questions.len() {
        return Err(QuizError::LengthMismatch {
            answers: answers.len(),
            questions: questions.len(),
        });
    }
    let correct = questions
        .iter()
        .zip(answers.slots())
        .filter(|(q, slot)| slot.is_some_and(|opt| q.is_correct(opt)))
        .count();
    Ok(QuizScore {
        correct: u32::try_from(correct).unwrap_or(u32::MAX),
        total: u32::try_from(questions.len()).unwrap_or(u32::MAX),
    })
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    const QUESTIONS: [QuizQuestion; 3] = [
        QuizQuestion {
            prompt: "a",
            options: &["x", "y"],
            correct: 0,
            explanation: "",
        },
        QuizQuestion {
            prompt: "b",
            options: &["x", "y", "z"],
            correct: 2,
            explanation: "",
        },
        QuizQuestion {
            prompt: "c",
            options: &["x", "y"],
            correct: 1,
            explanation: "",
        },
    ];

    fn answers(slots: &[Option<usize>]) -> QuizAnswers {
        QuizAnswers::from_slots(slots.to_vec())
    }

    #[test]
    fn all_correct_scores_full() {
        let s = score(&QUESTIONS, &answers(&[Some(0), Some(2), Some(1)])).unwrap();
        assert_eq!(s, QuizScore { correct: 3, total: 3 });
        assert_eq!(s.percent(), 100);
    }

    #[test]
    fn all_wrong_scores_zero() {
        let s = score(&QUESTIONS, &answers(&[Some(1), Some(0), Some(0)])).unwrap();
        assert_eq!(s.correct, 0);
    }

    #[test]
    fn mixed_and_unanswered() {
        let s = score(&QUESTIONS, &answers(&[Some(0), None, Some(0)])).unwrap();
        assert_eq!(s.correct, 1);
        assert_eq!(s.total, 3);
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let err = score(&QUESTIONS, &QuizAnswers::new(2)).unwrap_err();
        assert_eq!(
            err,
            QuizError::LengthMismatch {
                answers: 2,
                questions: 3
            }
        );
    }

    #[test]
    fn select_checks_bounds() {
        let mut a = QuizAnswers::new(3);
        assert!(a.select(&QUESTIONS, 1, 2).is_ok());
        assert_eq!(a.get(1), Some(2));
        assert!(matches!(
            a.select(&QUESTIONS, 0, 5),
            Err(QuizError::OptionOutOfRange { .. })
        ));
        assert!(matches!(
            a.select(&QUESTIONS, 9, 0),
            Err(QuizError::QuestionOutOfRange { .. })
        ));
        assert_eq!(a.answered(), 1);
        assert_eq!(a.remaining(), 2);
    }

    #[test]
    fn threshold_seven_of_ten() {
        let t = PassThreshold::SEVEN_OF_TEN;
        assert!(QuizScore { correct: 7, total: 10 }.passed(t));
        assert!(!QuizScore { correct: 6, total: 10 }.passed(t));
        assert_eq!(t.required(10), 7);
        let two_of_three = PassThreshold {
            numerator: 2,
            denominator: 3,
        };
        assert!(QuizScore { correct: 2, total: 3 }.passed(two_of_three));
        assert!(!QuizScore { correct: 1, total: 3 }.passed(two_of_three));
    }

    #[test]
    fn wire_format_uses_minus_one() {
        let a = answers(&[Some(1), None]);
        assert_eq!(serde_json::to_string(&a).unwrap(), "[1,-1]");
        let back: QuizAnswers = serde_json::from_str("[-1,2]").unwrap();
        assert_eq!(back.slots(), &[None, Some(2)]);
    }
}
