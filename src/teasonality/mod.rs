//! Teasonality: a six-question personality quiz over three axes.

pub mod personalities;
pub mod sampler;

use crate::error::{Result, TeaError};
use crate::types::record::TeaRecord;
use personalities::{Personality, Question, FORCED_RESULT_KEY, QUESTIONS};
use rand::Rng;
use sampler::Recommendation;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Energy,
    Adventure,
    Flavor,
}

/// Which side of an axis a personality key selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pole {
    Positive,
    Negative,
    Either,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::Energy, Axis::Adventure, Axis::Flavor];

    pub fn index(self) -> usize {
        match self {
            Self::Energy => 0,
            Self::Adventure => 1,
            Self::Flavor => 2,
        }
    }

    pub fn positive_letter(self) -> char {
        match self {
            Self::Energy => 'E',
            Self::Adventure => 'A',
            Self::Flavor => 'B',
        }
    }

    pub fn negative_letter(self) -> char {
        match self {
            Self::Energy => 'C',
            Self::Adventure => 'C',
            Self::Flavor => 'S',
        }
    }

    pub fn letter_for(self, total: i32) -> char {
        match total {
            t if t > 0 => self.positive_letter(),
            t if t < 0 => self.negative_letter(),
            _ => 'x',
        }
    }

    pub fn pole(self, letter: char) -> Option<Pole> {
        if letter == 'x' {
            Some(Pole::Either)
        } else if letter == self.positive_letter() {
            Some(Pole::Positive)
        } else if letter == self.negative_letter() {
            Some(Pole::Negative)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "i32")]
pub enum AnswerValue {
    Positive,
    Neutral,
    Negative,
}

impl AnswerValue {
    pub fn value(self) -> i32 {
        match self {
            Self::Positive => 1,
            Self::Neutral => 0,
            Self::Negative => -1,
        }
    }
}

impl From<AnswerValue> for i32 {
    fn from(answer: AnswerValue) -> Self {
        answer.value()
    }
}

impl TryFrom<i32> for AnswerValue {
    type Error = TeaError;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            1 => Ok(Self::Positive),
            0 => Ok(Self::Neutral),
            -1 => Ok(Self::Negative),
            other => Err(TeaError::InvalidAnswer(format!(
                "{other} is not one of 1, 0, -1"
            ))),
        }
    }
}

impl FromStr for AnswerValue {
    type Err = TeaError;

    fn from_str(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let value = trimmed
            .strip_prefix('+')
            .unwrap_or(trimmed)
            .parse::<i32>()
            .map_err(|_| TeaError::InvalidAnswer(format!("'{trimmed}' is not a number")))?;
        Self::try_from(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "step", content = "index", rename_all = "snake_case")]
pub enum QuizStep {
    Question(usize),
    ExtraQuestion,
    Result,
    AlternateEnding,
}

impl fmt::Display for QuizStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Question(index) => write!(f, "question {}", index + 1),
            Self::ExtraQuestion => write!(f, "the extra question"),
            Self::Result => write!(f, "the result"),
            Self::AlternateEnding => write!(f, "the alternate ending"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnswerProfile {
    /// Indexed by [`Axis::index`].
    pub axis_scores: [i32; 3],
    pub history: Vec<AnswerValue>,
    pub forced_result_key: Option<String>,
}

impl AnswerProfile {
    pub fn is_uniform(&self) -> bool {
        self.history
            .first()
            .is_some_and(|first| self.history.iter().all(|value| value == first))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizOutcome {
    pub step: QuizStep,
    pub key: Option<String>,
    pub personality: Option<&'static Personality>,
    pub recommendations: Vec<Recommendation>,
}

/// Quiz session state machine. Each session owns its answers; nothing is shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    step: QuizStep,
    profile: AnswerProfile,
}

impl Default for Quiz {
    fn default() -> Self {
        Self::new()
    }
}

impl Quiz {
    pub fn new() -> Self {
        Self {
            step: QuizStep::Question(0),
            profile: AnswerProfile::default(),
        }
    }

    pub fn step(&self) -> QuizStep {
        self.step
    }

    pub fn profile(&self) -> &AnswerProfile {
        &self.profile
    }

    pub fn current_question(&self) -> Option<&'static Question> {
        match self.step {
            QuizStep::Question(index) => QUESTIONS.get(index),
            _ => None,
        }
    }

    /// Records an answer to the current question and advances. After the last
    /// question a uniform history diverts to the extra question.
    pub fn answer(&mut self, value: AnswerValue) -> Result<QuizStep> {
        let QuizStep::Question(index) = self.step else {
            return Err(self.invalid("answer a question"));
        };
        let question = QUESTIONS
            .get(index)
            .ok_or_else(|| self.invalid("answer a question"))?;

        self.profile.axis_scores[question.axis.index()] += value.value();
        self.profile.history.push(value);

        self.step = if index + 1 < QUESTIONS.len() {
            QuizStep::Question(index + 1)
        } else if self.profile.is_uniform() {
            tracing::debug!(history = ?self.profile.history, "uniform answers, asking extra question");
            QuizStep::ExtraQuestion
        } else {
            QuizStep::Result
        };
        Ok(self.step)
    }

    /// "Do you enjoy tea?" Yes forces the `xxx` result, no ends the quiz.
    pub fn answer_extra(&mut self, enjoys_tea: bool) -> Result<QuizStep> {
        if self.step != QuizStep::ExtraQuestion {
            return Err(self.invalid("answer the extra question"));
        }
        self.step = if enjoys_tea {
            self.profile.forced_result_key = Some(FORCED_RESULT_KEY.to_string());
            QuizStep::Result
        } else {
            QuizStep::AlternateEnding
        };
        Ok(self.step)
    }

    /// The personality key, only once the quiz is at its result.
    pub fn result_key(&self) -> Option<String> {
        if self.step != QuizStep::Result {
            return None;
        }
        if let Some(forced) = &self.profile.forced_result_key {
            return Some(forced.clone());
        }
        let [energy, adventure, flavor] = self.profile.axis_scores;
        Some(personalities::personality_key(energy, adventure, flavor))
    }

    /// Resolves the result key; a key missing from the table yields `None`.
    pub fn personality(&self) -> Option<&'static Personality> {
        let key = self.result_key()?;
        let personality = personalities::lookup(&key);
        if personality.is_none() {
            tracing::warn!(key = %key, "personality key missing from table");
        }
        personality
    }

    /// Back to the first question with every accumulator cleared.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Snapshot for display. Recommendations are sampled only when a
    /// personality resolved.
    pub fn outcome<R: Rng + ?Sized>(&self, records: &[TeaRecord], rng: &mut R) -> QuizOutcome {
        let key = self.result_key();
        let personality = self.personality();
        let recommendations = match personality {
            Some(personality) => sampler::recommend(records, personality.key, rng),
            None => Vec::new(),
        };
        QuizOutcome {
            step: self.step,
            key,
            personality,
            recommendations,
        }
    }

    fn invalid(&self, action: &str) -> TeaError {
        TeaError::InvalidTransition {
            step: self.step.to_string(),
            action: action.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer_all(quiz: &mut Quiz, values: [i32; 6]) -> QuizStep {
        let mut step = quiz.step();
        for value in values {
            let answer = AnswerValue::try_from(value).expect("test answers are valid");
            step = quiz.answer(answer).expect("answer should be accepted");
        }
        step
    }

    #[test]
    fn answers_accumulate_per_axis() {
        let mut quiz = Quiz::new();
        let step = answer_all(&mut quiz, [1, 1, -1, 0, 0, -1]);
        assert_eq!(step, QuizStep::Result);
        assert_eq!(quiz.profile().axis_scores, [2, -1, -1]);
        assert_eq!(quiz.result_key().as_deref(), Some("ECS"));
        assert_eq!(
            quiz.personality().map(|personality| personality.name),
            Some("The Sweet Spot")
        );
    }

    #[test]
    fn steps_advance_one_question_at_a_time() {
        let mut quiz = Quiz::new();
        assert_eq!(quiz.step(), QuizStep::Question(0));
        assert_eq!(quiz.current_question().map(|question| question.id), Some(1));
        assert_eq!(
            quiz.answer(AnswerValue::Neutral).expect("answer should work"),
            QuizStep::Question(1)
        );
        assert!(quiz.result_key().is_none());
    }

    #[test]
    fn uniform_positive_answers_trigger_extra_question() {
        let mut quiz = Quiz::new();
        let step = answer_all(&mut quiz, [1; 6]);
        assert_eq!(step, QuizStep::ExtraQuestion);
        assert!(quiz.result_key().is_none());
    }

    #[test]
    fn uniform_neutral_and_negative_answers_trigger_extra_question() {
        for value in [0, -1] {
            let mut quiz = Quiz::new();
            assert_eq!(answer_all(&mut quiz, [value; 6]), QuizStep::ExtraQuestion);
        }
    }

    #[test]
    fn enjoying_tea_forces_eclectic_result() {
        let mut quiz = Quiz::new();
        answer_all(&mut quiz, [1; 6]);
        assert_eq!(quiz.answer_extra(true).expect("extra answer"), QuizStep::Result);
        assert_eq!(quiz.result_key().as_deref(), Some("xxx"));
        assert_eq!(
            quiz.personality().map(|personality| personality.name),
            Some("True Eclectic")
        );
    }

    #[test]
    fn not_enjoying_tea_reaches_alternate_ending() {
        let mut quiz = Quiz::new();
        answer_all(&mut quiz, [-1; 6]);
        assert_eq!(
            quiz.answer_extra(false).expect("extra answer"),
            QuizStep::AlternateEnding
        );
        assert!(quiz.personality().is_none());
        assert!(quiz.answer(AnswerValue::Positive).is_err());

        quiz.reset();
        assert_eq!(quiz, Quiz::new());
    }

    #[test]
    fn out_of_order_actions_are_rejected() {
        let mut quiz = Quiz::new();
        let err = quiz.answer_extra(true).expect_err("extra question not reached");
        assert!(err.to_string().contains("question 1"));

        answer_all(&mut quiz, [1, 0, 1, 0, 1, 0]);
        let err = quiz
            .answer(AnswerValue::Positive)
            .expect_err("no seventh question");
        assert!(matches!(err, TeaError::InvalidTransition { .. }));
        assert_eq!(quiz.profile().history.len(), 6);
    }

    #[test]
    fn reset_clears_mid_quiz_state() {
        let mut quiz = Quiz::new();
        answer_all(&mut quiz, [1; 6]);
        quiz.answer_extra(true).expect("extra answer");
        quiz.reset();
        assert_eq!(quiz.step(), QuizStep::Question(0));
        assert_eq!(quiz.profile(), &AnswerProfile::default());
    }

    #[test]
    fn outcome_samples_only_for_resolved_personality() {
        use crate::types::record::fixtures::tea_with_levels;
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let records = vec![
            tea_with_levels("Assam", "Black", Some(3), Some(0)),
            tea_with_levels("Chamomile", "Herbal", Some(0), Some(2)),
            tea_with_levels("Sencha", "Green", Some(2), Some(1)),
        ];
        let mut rng = StdRng::seed_from_u64(5);

        let mut quiz = Quiz::new();
        let pending = quiz.outcome(&records, &mut rng);
        assert!(pending.personality.is_none());
        assert!(pending.recommendations.is_empty());

        answer_all(&mut quiz, [1, 1, 1, 0, -1, 0]);
        let outcome = quiz.outcome(&records, &mut rng);
        assert_eq!(outcome.key.as_deref(), Some("EAS"));
        assert_eq!(outcome.recommendations.len(), 3);
    }

    #[test]
    fn answer_values_parse_from_text() {
        assert_eq!("+1".parse::<AnswerValue>().expect("+1"), AnswerValue::Positive);
        assert_eq!(" 0".parse::<AnswerValue>().expect("0"), AnswerValue::Neutral);
        assert_eq!("-1".parse::<AnswerValue>().expect("-1"), AnswerValue::Negative);
        assert!("2".parse::<AnswerValue>().is_err());
        assert!("yes".parse::<AnswerValue>().is_err());
    }

    #[test]
    fn axis_poles_round_trip_letters() {
        assert_eq!(Axis::Energy.pole('E'), Some(Pole::Positive));
        assert_eq!(Axis::Energy.pole('C'), Some(Pole::Negative));
        assert_eq!(Axis::Adventure.pole('C'), Some(Pole::Negative));
        assert_eq!(Axis::Flavor.pole('S'), Some(Pole::Negative));
        assert_eq!(Axis::Flavor.pole('x'), Some(Pole::Either));
        assert_eq!(Axis::Flavor.pole('E'), None);
    }
}
