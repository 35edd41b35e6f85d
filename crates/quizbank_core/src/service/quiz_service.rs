//! Quiz generation use-cases.
//!
//! # Responsibility
//! - Validate the requested quiz size before any side effect.
//! - Select questions for custom (filtered) and random (one content tag)
//!   quizzes.
//! - Persist the new quiz and stash it for the quiz display's first load.
//!
//! # Invariants
//! - A generated quiz never holds more than the requested count and never
//!   repeats a question.
//! - Shuffling is Fisher-Yates driven by the caller's RNG, so seeded callers
//!   get reproducible quizzes.

use crate::model::command_term::is_lower_order;
use crate::model::history::ResponseHistory;
use crate::model::question::{Question, TagGroup};
use crate::model::quiz::{Quiz, QuizConfig, QuizEntry};
use crate::repo::handoff_repo::QuizHandoff;
use crate::repo::kv_repo::{KeyValueStore, StoreError};
use crate::repo::response_repo::ResponseStore;
use crate::search::filter::{filter_questions, Familiarity, QuestionFilter};
use log::{info, warn};
use rand::Rng;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Smallest accepted quiz size.
pub const MIN_QUIZ_SIZE: i64 = 1;
/// Largest accepted quiz size.
pub const MAX_QUIZ_SIZE: i64 = 100;

#[derive(Debug)]
pub enum QuizBuildError {
    /// Requested size is not an integer in `[MIN_QUIZ_SIZE, MAX_QUIZ_SIZE]`.
    Range(String),
    Store(StoreError),
}

impl Display for QuizBuildError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Range(value) => write!(
                f,
                "number of questions must be between {MIN_QUIZ_SIZE} and {MAX_QUIZ_SIZE} (got `{value}`)"
            ),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for QuizBuildError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Range(_) => None,
        }
    }
}

impl From<StoreError> for QuizBuildError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

pub fn validate_quiz_size(count: i64) -> Result<usize, QuizBuildError> {
    if !(MIN_QUIZ_SIZE..=MAX_QUIZ_SIZE).contains(&count) {
        return Err(QuizBuildError::Range(count.to_string()));
    }
    usize::try_from(count).map_err(|_| QuizBuildError::Range(count.to_string()))
}

/// Parses user-entered text; anything but an in-range integer is rejected.
pub fn parse_quiz_size(raw: &str) -> Result<usize, QuizBuildError> {
    let trimmed = raw.trim();
    trimmed
        .parse::<i64>()
        .map_err(|_| QuizBuildError::Range(trimmed.to_string()))
        .and_then(validate_quiz_size)
}

/// In-place Fisher-Yates shuffle.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Keeps all matches when they fit, otherwise a shuffled sample of `count`.
pub fn select_custom_questions<'a, R: Rng + ?Sized>(
    mut matched: Vec<&'a Question>,
    count: usize,
    rng: &mut R,
) -> Vec<&'a Question> {
    if matched.len() > count {
        shuffle(&mut matched, rng);
        matched.truncate(count);
    }
    matched
}

/// Outcome of random selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomSelection<'a> {
    /// Content tag drawn for this quiz, `None` when the bank has none.
    pub content_tag: Option<String>,
    pub questions: Vec<&'a Question>,
}

/// Draws one content tag uniformly, then samples lower-order questions
/// carrying it.
pub fn select_random_questions<'a, R: Rng + ?Sized>(
    bank: &'a [Question],
    count: usize,
    rng: &mut R,
) -> RandomSelection<'a> {
    let mut content_tags: Vec<&str> = Vec::new();
    for tag in bank.iter().flat_map(|q| q.tags(TagGroup::Content)) {
        if !content_tags.contains(&tag.as_str()) {
            content_tags.push(tag.as_str());
        }
    }
    if content_tags.is_empty() {
        return RandomSelection {
            content_tag: None,
            questions: Vec::new(),
        };
    }

    let drawn = content_tags[rng.gen_range(0..content_tags.len())];
    let mut questions: Vec<&Question> = bank
        .iter()
        .filter(|q| q.tags(TagGroup::Content).iter().any(|tag| tag == drawn))
        .filter(|q| q.command_term().is_some_and(is_lower_order))
        .collect();
    shuffle(&mut questions, rng);
    questions.truncate(count);

    RandomSelection {
        content_tag: Some(drawn.to_string()),
        questions,
    }
}

/// Custom quiz request: filter criteria plus the raw requested size.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomQuizRequest {
    pub filter: QuestionFilter,
    pub count: i64,
}

impl CustomQuizRequest {
    fn config_snapshot(&self, count: usize) -> QuizConfig {
        let filter = &self.filter;
        QuizConfig {
            source: filter.source.clone().unwrap_or_default(),
            author: filter.author.clone().unwrap_or_default(),
            paper: filter.paper.clone().unwrap_or_default(),
            tags: filter
                .tags
                .iter()
                .filter(|(_, tags)| !tags.is_empty())
                .map(|(group, tags)| (*group, tags.iter().cloned().collect()))
                .collect(),
            command_terms: filter.command_terms.iter().cloned().collect(),
            num_questions: count_as_u32(count),
        }
    }
}

/// Quiz generation facade.
///
/// `store` holds the durable quiz blob, `session` receives the handoff.
pub struct QuizService<S: KeyValueStore, H: KeyValueStore> {
    store: S,
    session: H,
}

impl<S: KeyValueStore, H: KeyValueStore> QuizService<S, H> {
    pub fn new(store: S, session: H) -> Self {
        Self { store, session }
    }

    /// Builds, persists and stashes a filtered quiz.
    pub fn build_custom_quiz<R: Rng + ?Sized>(
        &self,
        bank: &[Question],
        request: &CustomQuizRequest,
        rng: &mut R,
    ) -> Result<Quiz, QuizBuildError> {
        let count = validate_quiz_size(request.count)?;
        let history = self.history_for(&request.filter);
        let matched = filter_questions(bank, &request.filter, &history);
        let match_count = matched.len();
        let selected = select_custom_questions(matched, count, rng);

        let quiz = self.persist(selected, request.config_snapshot(count))?;
        info!(
            "event=quiz_build module=service status=ok kind=custom quiz_id={} matched={} selected={}",
            quiz.id,
            match_count,
            quiz.questions.len()
        );
        Ok(quiz)
    }

    /// Builds, persists and stashes a random lower-order quiz.
    pub fn build_random_quiz<R: Rng + ?Sized>(
        &self,
        bank: &[Question],
        count: i64,
        rng: &mut R,
    ) -> Result<Quiz, QuizBuildError> {
        let count = validate_quiz_size(count)?;
        let selection = select_random_questions(bank, count, rng);
        let config = QuizConfig {
            num_questions: count_as_u32(count),
            ..QuizConfig::default()
        };

        let content_tag = selection.content_tag.unwrap_or_default();
        let quiz = self.persist(selection.questions, config)?;
        info!(
            "event=quiz_build module=service status=ok kind=random quiz_id={} content_tag={:?} selected={}",
            quiz.id,
            content_tag,
            quiz.questions.len()
        );
        Ok(quiz)
    }

    fn history_for(&self, filter: &QuestionFilter) -> ResponseHistory {
        match filter.familiarity {
            Familiarity::Both => ResponseHistory::default(),
            _ => ResponseStore::new(&self.store).history(),
        }
    }

    fn persist(&self, selected: Vec<&Question>, config: QuizConfig) -> Result<Quiz, QuizBuildError> {
        let questions: Vec<Question> = selected.into_iter().cloned().collect();
        let entry = QuizEntry {
            questions: questions.iter().map(|q| q.id.clone()).collect(),
            config: Some(config),
            responses: Vec::new(),
            last_save: None,
        };

        let quiz_id = ResponseStore::new(&self.store).create_quiz(entry.clone())?;
        if let Some(config) = entry.config.as_ref() {
            if let Err(err) = QuizHandoff::new(&self.session).stash(&questions, config) {
                warn!(
                    "event=quiz_handoff module=service status=error quiz_id={} error={}",
                    quiz_id, err
                );
            }
        }

        Ok(Quiz {
            id: quiz_id,
            entry,
            questions,
        })
    }
}

fn count_as_u32(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}
