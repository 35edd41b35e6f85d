//! Read model over stored quiz and exam responses.
//!
//! Built once per listing and consulted by the familiarity filter, the
//! response-status sort keys and the browse table badges.

use super::question::QuestionId;
use super::quiz::{ExamResponseEntry, QuizEntry};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHistory {
    quiz_counts: BTreeMap<QuestionId, usize>,
    exam_answered: BTreeSet<QuestionId>,
    exams_with_responses: BTreeSet<String>,
}

impl ResponseHistory {
    pub fn from_entries<'a>(
        quizzes: impl IntoIterator<Item = &'a QuizEntry>,
        exams: impl IntoIterator<Item = (&'a String, &'a ExamResponseEntry)>,
    ) -> Self {
        let mut history = Self::default();
        for quiz in quizzes {
            for response in &quiz.responses {
                *history.quiz_counts.entry(response.id.clone()).or_insert(0) += 1;
            }
        }
        for (exam_id, exam) in exams {
            if !exam.responses.is_empty() {
                history.exams_with_responses.insert(exam_id.clone());
            }
            history
                .exam_answered
                .extend(exam.responses.iter().map(|response| response.id.clone()));
        }
        history
    }

    /// Seen = appears in at least one quiz response list.
    pub fn is_seen(&self, id: &QuestionId) -> bool {
        self.quiz_counts.contains_key(id)
    }

    pub fn seen_ids(&self) -> impl Iterator<Item = &QuestionId> {
        self.quiz_counts.keys()
    }

    /// Number of quiz response entries for this id, with multiplicity.
    pub fn quiz_count(&self, id: &QuestionId) -> usize {
        self.quiz_counts.get(id).copied().unwrap_or(0)
    }

    pub fn has_exam_response(&self, id: &QuestionId) -> bool {
        self.exam_answered.contains(id)
    }

    pub fn exam_has_responses(&self, exam_id: &str) -> bool {
        self.exams_with_responses.contains(exam_id)
    }
}
