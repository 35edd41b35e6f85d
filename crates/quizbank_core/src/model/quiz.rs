//! Quiz and response records.
//!
//! # Responsibility
//! - Define the persisted shapes of quiz and exam response blobs.
//! - Keep wire names compatible with previously stored data (`camelCase`).
//!
//! # Invariants
//! - `QuizId` values are positive and assigned as max-existing + 1.
//! - A quiz's `responses`, when non-empty, align by position with the
//!   questions shown when they were saved.

use super::question::{Question, QuestionId, TagGroup};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::num::NonZeroU64;
use std::str::FromStr;

/// Sequential quiz identifier. Stored as the decimal key of the quiz blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QuizId(NonZeroU64);

impl QuizId {
    pub const FIRST: QuizId = QuizId(NonZeroU64::MIN);

    pub fn new(value: u64) -> Option<Self> {
        NonZeroU64::new(value).map(Self)
    }

    pub fn get(self) -> u64 {
        self.0.get()
    }

    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Storage key form (`"12"`).
    pub fn as_key(self) -> String {
        self.0.to_string()
    }

    /// Parses a stored key; keys that are not positive integers are ignored.
    pub fn from_key(key: &str) -> Option<Self> {
        key.trim().parse::<u64>().ok().and_then(Self::new)
    }
}

impl Display for QuizId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for QuizId {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_key(value).ok_or_else(|| format!("invalid quiz id `{value}`"))
    }
}

/// One saved answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEntry {
    pub id: QuestionId,
    #[serde(default)]
    pub value: String,
}

impl ResponseEntry {
    pub fn new(id: impl Into<QuestionId>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
        }
    }
}

/// Filter snapshot recorded when a quiz is generated.
///
/// Empty strings mean "any".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizConfig {
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub paper: String,
    #[serde(default)]
    pub tags: BTreeMap<TagGroup, Vec<String>>,
    #[serde(default)]
    pub command_terms: Vec<String>,
    #[serde(default)]
    pub num_questions: u32,
}

impl QuizConfig {
    /// True when any tag group carries a selection.
    pub fn has_tag_selection(&self) -> bool {
        self.tags.values().any(|tags| !tags.is_empty())
    }
}

/// Persisted quiz record (one value of the quiz-responses blob).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizEntry {
    #[serde(default)]
    pub questions: Vec<QuestionId>,
    #[serde(default)]
    pub config: Option<QuizConfig>,
    #[serde(default)]
    pub responses: Vec<ResponseEntry>,
    /// Epoch milliseconds of the last save, `None` until first saved.
    #[serde(default)]
    pub last_save: Option<i64>,
}

/// Persisted answers for in-place exam answering, keyed by exam id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamResponseEntry {
    #[serde(default)]
    pub responses: Vec<ResponseEntry>,
    #[serde(default)]
    pub last_save: Option<i64>,
}

impl ExamResponseEntry {
    /// Replaces the answer for `question_id` or appends a new one.
    pub fn upsert(&mut self, question_id: QuestionId, value: String) {
        match self.responses.iter_mut().find(|entry| entry.id == question_id) {
            Some(existing) => existing.value = value,
            None => self.responses.push(ResponseEntry {
                id: question_id,
                value,
            }),
        }
    }
}

/// A freshly generated quiz, returned for immediate display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    pub id: QuizId,
    pub entry: QuizEntry,
    /// Full records in quiz order.
    pub questions: Vec<Question>,
}
