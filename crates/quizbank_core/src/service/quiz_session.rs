//! Quiz display and answering session.
//!
//! # Responsibility
//! - Resolve a stored quiz into full question records.
//! - Hold in-progress answers aligned by position with those records.
//! - Save answers back through the response store.
//!
//! # Invariants
//! - `answers().len() == questions().len()` at all times.
//! - Ids that no longer resolve against the bank are dropped silently,
//!   together with any answer saved for them.

use crate::clock::Clock;
use crate::model::question::{Question, QuestionId};
use crate::model::quiz::{QuizConfig, QuizId, ResponseEntry};
use crate::repo::handoff_repo::QuizHandoff;
use crate::repo::kv_repo::{KeyValueStore, StoreResult};
use crate::repo::response_repo::ResponseStore;
use log::{debug, info};
use std::collections::HashMap;

/// Where the displayed question list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionSource {
    /// Ids of previously saved responses.
    SavedResponses,
    /// Ids recorded when the quiz was generated.
    StoredQuestions,
    /// Session handoff written by the quiz builder.
    Handoff,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSession {
    quiz_id: QuizId,
    questions: Vec<Question>,
    answers: Vec<String>,
    config: Option<QuizConfig>,
    last_save: Option<i64>,
    source: QuestionSource,
}

impl QuizSession {
    /// Opens a quiz for display. `None` when no question list resolves.
    pub fn open<S, C, H>(
        quiz_id: QuizId,
        bank: &[Question],
        responses: &ResponseStore<S, C>,
        handoff: &QuizHandoff<H>,
    ) -> Option<Self>
    where
        S: KeyValueStore,
        C: Clock,
        H: KeyValueStore,
    {
        let entry = responses.quiz(quiz_id).unwrap_or_default();
        let by_id: HashMap<&QuestionId, &Question> = bank.iter().map(|q| (&q.id, q)).collect();

        let mut config = entry.config.clone();
        let (questions, answers, source) = if !entry.responses.is_empty() {
            let (questions, answers): (Vec<Question>, Vec<String>) = entry
                .responses
                .iter()
                .filter_map(|r| by_id.get(&r.id).map(|q| ((*q).clone(), r.value.clone())))
                .unzip();
            (questions, answers, QuestionSource::SavedResponses)
        } else if !entry.questions.is_empty() {
            let questions = resolve_ids(&by_id, entry.questions.iter());
            let answers = vec![String::new(); questions.len()];
            (questions, answers, QuestionSource::StoredQuestions)
        } else {
            let stashed = handoff.take();
            if config.is_none() {
                config = stashed.config;
            }
            let answers = vec![String::new(); stashed.questions.len()];
            (stashed.questions, answers, QuestionSource::Handoff)
        };

        if questions.is_empty() {
            info!(
                "event=quiz_open module=service status=empty quiz_id={}",
                quiz_id
            );
            return None;
        }

        debug!(
            "event=quiz_open module=service status=ok quiz_id={} questions={} source={:?}",
            quiz_id,
            questions.len(),
            source
        );

        Some(Self {
            quiz_id,
            questions,
            answers,
            config,
            last_save: entry.last_save,
            source,
        })
    }

    pub fn quiz_id(&self) -> QuizId {
        self.quiz_id
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn config(&self) -> Option<&QuizConfig> {
        self.config.as_ref()
    }

    pub fn source(&self) -> QuestionSource {
        self.source
    }

    pub fn last_save(&self) -> Option<i64> {
        self.last_save
    }

    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    /// Replaces the answer at `index`. Returns false when out of range.
    pub fn set_answer(&mut self, index: usize, value: impl Into<String>) -> bool {
        match self.answers.get_mut(index) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Pairs every displayed question id with its current answer.
    pub fn to_responses(&self) -> Vec<ResponseEntry> {
        self.questions
            .iter()
            .zip(&self.answers)
            .map(|(question, answer)| ResponseEntry {
                id: question.id.clone(),
                value: answer.clone(),
            })
            .collect()
    }

    pub fn save<S: KeyValueStore, C: Clock>(
        &mut self,
        responses: &ResponseStore<S, C>,
    ) -> StoreResult<i64> {
        let saved_at = responses.save_quiz_responses(self.quiz_id, self.to_responses())?;
        self.last_save = Some(saved_at);
        Ok(saved_at)
    }
}

fn resolve_ids<'a>(
    by_id: &HashMap<&QuestionId, &Question>,
    ids: impl Iterator<Item = &'a QuestionId>,
) -> Vec<Question> {
    ids.filter_map(|id| by_id.get(id).map(|question| (*question).clone()))
        .collect()
}
