//! Quiz and exam response store.
//!
//! # Responsibility
//! - Persist quizzes (question ids, config snapshot, answers, last save).
//! - Persist per-exam answers with single-answer upserts.
//! - Answer history queries (seen ids, quiz counts, exam status).
//!
//! # Invariants
//! - New quiz ids are max-existing numeric id + 1, starting at 1.
//! - Saves are last-write-wins over the whole blob; there is no merge.
//! - Corrupt blobs read as empty collections.
//! - Writes abort with `StoreError` when the blob cannot be read, so a
//!   transport failure never overwrites stored entries.

use crate::clock::{Clock, SystemClock};
use crate::model::history::ResponseHistory;
use crate::model::question::QuestionId;
use crate::model::quiz::{ExamResponseEntry, QuizEntry, QuizId, ResponseEntry};
use crate::repo::kv_repo::{
    read_json_blob, try_read_json_blob, write_json_blob, KeyValueStore, StoreResult,
    EXAM_RESPONSES_KEY, QUIZ_RESPONSES_KEY,
};
use log::{debug, info};
use std::collections::{BTreeMap, BTreeSet};

/// Raw quiz blob. Keys stay strings so foreign keys survive a rewrite.
type QuizBlob = BTreeMap<String, QuizEntry>;
type ExamBlob = BTreeMap<String, ExamResponseEntry>;

pub struct ResponseStore<S: KeyValueStore, C: Clock = SystemClock> {
    store: S,
    clock: C,
}

impl<S: KeyValueStore> ResponseStore<S, SystemClock> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> ResponseStore<S, C> {
    pub fn with_clock(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    /// All quizzes with a numeric id.
    pub fn quizzes(&self) -> BTreeMap<QuizId, QuizEntry> {
        self.quiz_blob()
            .into_iter()
            .filter_map(|(key, entry)| QuizId::from_key(&key).map(|id| (id, entry)))
            .collect()
    }

    pub fn quiz(&self, quiz_id: QuizId) -> Option<QuizEntry> {
        self.quiz_blob().remove(&quiz_id.as_key())
    }

    /// Stores `entry` under a freshly assigned id.
    pub fn create_quiz(&self, entry: QuizEntry) -> StoreResult<QuizId> {
        let mut blob = self.quiz_blob_for_write()?;
        let quiz_id = next_quiz_id(blob.keys().map(String::as_str));
        let question_count = entry.questions.len();
        blob.insert(quiz_id.as_key(), entry);
        write_json_blob(&self.store, QUIZ_RESPONSES_KEY, &blob)?;
        info!(
            "event=quiz_create module=repo status=ok quiz_id={} questions={}",
            quiz_id, question_count
        );
        Ok(quiz_id)
    }

    /// Overwrites the quiz's responses and stamps `lastSave`.
    ///
    /// Returns the stamped time. An unknown quiz id creates a bare entry.
    pub fn save_quiz_responses(
        &self,
        quiz_id: QuizId,
        responses: Vec<ResponseEntry>,
    ) -> StoreResult<i64> {
        let mut blob = self.quiz_blob_for_write()?;
        let now = self.clock.now_epoch_ms();
        let response_count = responses.len();
        let entry = blob.entry(quiz_id.as_key()).or_default();
        entry.responses = responses;
        entry.last_save = Some(now);
        write_json_blob(&self.store, QUIZ_RESPONSES_KEY, &blob)?;
        debug!(
            "event=quiz_save module=repo status=ok quiz_id={} responses={} last_save={}",
            quiz_id, response_count, now
        );
        Ok(now)
    }

    pub fn load_quiz_responses(&self, quiz_id: QuizId) -> Vec<ResponseEntry> {
        self.quiz(quiz_id)
            .map(|entry| entry.responses)
            .unwrap_or_default()
    }

    pub fn exam_responses(&self) -> BTreeMap<String, ExamResponseEntry> {
        self.exam_blob()
    }

    pub fn load_exam_responses(&self, exam_id: &str) -> Vec<ResponseEntry> {
        self.exam_blob()
            .remove(exam_id)
            .map(|entry| entry.responses)
            .unwrap_or_default()
    }

    /// Upserts one answer inside the exam's response list.
    pub fn save_exam_response(
        &self,
        exam_id: &str,
        question_id: QuestionId,
        value: impl Into<String>,
    ) -> StoreResult<i64> {
        let mut blob = self.exam_blob_for_write()?;
        let now = self.clock.now_epoch_ms();
        let entry = blob.entry(exam_id.to_string()).or_default();
        entry.upsert(question_id, value.into());
        entry.last_save = Some(now);
        write_json_blob(&self.store, EXAM_RESPONSES_KEY, &blob)?;
        debug!(
            "event=exam_save module=repo status=ok exam_id={} last_save={}",
            exam_id, now
        );
        Ok(now)
    }

    /// True when any exam holds an answer for this question.
    pub fn has_exam_response(&self, question_id: &QuestionId) -> bool {
        self.exam_blob()
            .values()
            .any(|exam| exam.responses.iter().any(|r| &r.id == question_id))
    }

    pub fn exam_has_responses(&self, exam_id: &str) -> bool {
        self.exam_blob()
            .get(exam_id)
            .is_some_and(|exam| !exam.responses.is_empty())
    }

    /// Response entries for this question across every quiz, with
    /// multiplicity.
    pub fn quiz_count_for(&self, question_id: &QuestionId) -> usize {
        self.quiz_blob()
            .values()
            .flat_map(|quiz| quiz.responses.iter())
            .filter(|response| &response.id == question_id)
            .count()
    }

    /// Distinct ids answered in at least one quiz.
    pub fn seen_question_ids(&self) -> BTreeSet<QuestionId> {
        self.quiz_blob()
            .into_values()
            .flat_map(|quiz| quiz.responses.into_iter().map(|response| response.id))
            .collect()
    }

    /// Snapshot of both blobs for filtering and listing.
    pub fn history(&self) -> ResponseHistory {
        let quizzes = self.quiz_blob();
        let exams = self.exam_blob();
        ResponseHistory::from_entries(quizzes.values(), exams.iter())
    }

    pub fn clear_quiz_responses(&self) -> StoreResult<()> {
        self.store.remove(QUIZ_RESPONSES_KEY)?;
        info!("event=quiz_clear module=repo status=ok");
        Ok(())
    }

    pub fn clear_exam_responses(&self) -> StoreResult<()> {
        self.store.remove(EXAM_RESPONSES_KEY)?;
        info!("event=exam_clear module=repo status=ok");
        Ok(())
    }

    fn quiz_blob(&self) -> QuizBlob {
        read_json_blob(&self.store, QUIZ_RESPONSES_KEY)
    }

    fn exam_blob(&self) -> ExamBlob {
        read_json_blob(&self.store, EXAM_RESPONSES_KEY)
    }

    fn quiz_blob_for_write(&self) -> StoreResult<QuizBlob> {
        try_read_json_blob(&self.store, QUIZ_RESPONSES_KEY)
    }

    fn exam_blob_for_write(&self) -> StoreResult<ExamBlob> {
        try_read_json_blob(&self.store, EXAM_RESPONSES_KEY)
    }
}

/// One more than the largest numeric key, or 1. Non-numeric keys are
/// ignored.
pub fn next_quiz_id<'a>(keys: impl IntoIterator<Item = &'a str>) -> QuizId {
    keys.into_iter()
        .filter_map(QuizId::from_key)
        .max()
        .map_or(QuizId::FIRST, QuizId::next)
}

#[cfg(test)]
mod tests {
    use super::next_quiz_id;

    #[test]
    fn next_quiz_id_starts_at_one() {
        assert_eq!(next_quiz_id(std::iter::empty()).get(), 1);
    }

    #[test]
    fn next_quiz_id_uses_numeric_max_not_lexical_max() {
        assert_eq!(next_quiz_id(["2", "10", "9"]).get(), 11);
    }

    #[test]
    fn next_quiz_id_skips_foreign_keys() {
        assert_eq!(next_quiz_id(["draft", "3"]).get(), 4);
    }
}
