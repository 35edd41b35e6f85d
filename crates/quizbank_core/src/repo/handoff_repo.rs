//! Session-scoped handoff of a freshly generated quiz.
//!
//! The quiz builder stashes the generated questions and config; the quiz
//! display reads them once, on first load, when the durable entry cannot be
//! resolved.

use crate::model::question::Question;
use crate::model::quiz::QuizConfig;
use crate::repo::kv_repo::{
    read_json_blob, write_json_blob, KeyValueStore, StoreResult, HANDOFF_CONFIG_KEY,
    HANDOFF_QUESTIONS_KEY,
};
use log::warn;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandoffQuiz {
    pub questions: Vec<Question>,
    pub config: Option<QuizConfig>,
}

pub struct QuizHandoff<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> QuizHandoff<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn stash(&self, questions: &[Question], config: &QuizConfig) -> StoreResult<()> {
        write_json_blob(&self.store, HANDOFF_QUESTIONS_KEY, questions)?;
        write_json_blob(&self.store, HANDOFF_CONFIG_KEY, config)
    }

    /// Reads the stashed quiz and clears it.
    pub fn take(&self) -> HandoffQuiz {
        let handoff = HandoffQuiz {
            questions: read_json_blob(&self.store, HANDOFF_QUESTIONS_KEY),
            config: read_json_blob(&self.store, HANDOFF_CONFIG_KEY),
        };
        for key in [HANDOFF_QUESTIONS_KEY, HANDOFF_CONFIG_KEY] {
            if let Err(err) = self.store.remove(key) {
                warn!(
                    "event=handoff_clear module=repo status=error key={} error={}",
                    key, err
                );
            }
        }
        handoff
    }
}
