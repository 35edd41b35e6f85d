//! Question and exam filter engine.
//!
//! # Responsibility
//! - Select bank rows matching conjunctive, independently optional criteria.
//! - Select exams that contain at least one matching question.
//! - Order listings by id, date or response status.
//!
//! # Invariants
//! - Filters are pure: output depends only on bank, criteria and history.
//! - Without a sort, output preserves input order (a subsequence).
//! - Question-level tag matching is ALL-of per group; exam-level matching
//!   asks whether ANY question of the exam matches.

use crate::model::exam::{exam_questions, Exam};
use crate::model::history::ResponseHistory;
use crate::model::question::{Question, TagGroup};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

/// Familiarity partition based on quiz history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Familiarity {
    #[default]
    Both,
    Seen,
    Unseen,
}

impl FromStr for Familiarity {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "both" => Ok(Self::Both),
            "seen" => Ok(Self::Seen),
            "unseen" => Ok(Self::Unseen),
            other => Err(format!(
                "unknown familiarity `{other}`; expected both|seen|unseen"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionSortKey {
    /// Numeric question id; non-numeric ids sort as zero.
    Id,
    /// Whether any exam holds an answer for the question.
    ExamStatus,
    /// Number of quiz answers recorded for the question.
    QuizCount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionSort {
    pub key: QuestionSortKey,
    pub direction: SortDirection,
}

/// Question-level criteria. Every field is optional; set fields are ANDed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionFilter {
    pub source: Option<String>,
    pub author: Option<String>,
    pub paper: Option<String>,
    /// Per group, the tags a question must ALL carry.
    pub tags: BTreeMap<TagGroup, BTreeSet<String>>,
    pub command_terms: BTreeSet<String>,
    /// Case-insensitive needle over question, answer and stimulus text.
    pub search: Option<String>,
    pub familiarity: Familiarity,
    pub sort: Option<QuestionSort>,
}

impl QuestionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_command_terms<I, T>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.command_terms.extend(terms.into_iter().map(Into::into));
        self
    }

    pub fn require_tags<I, T>(mut self, group: TagGroup, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags
            .entry(group)
            .or_default()
            .extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn matches(&self, question: &Question, history: &ResponseHistory) -> bool {
        let needle = search_needle(self.search.as_deref());
        self.matches_with_needle(question, history, needle.as_deref())
    }

    fn matches_with_needle(
        &self,
        question: &Question,
        history: &ResponseHistory,
        needle: Option<&str>,
    ) -> bool {
        equals_if_set(self.source.as_deref(), question.source.as_deref())
            && equals_if_set(self.author.as_deref(), question.author.as_deref())
            && equals_if_set(self.paper.as_deref(), question.paper_id.as_deref())
            && self
                .tags
                .iter()
                .all(|(group, required)| question.has_all_tags(*group, required))
            && (self.command_terms.is_empty() || term_in(&self.command_terms, question))
            && needle.map_or(true, |needle| question_text_contains(question, needle))
            && match self.familiarity {
                Familiarity::Both => true,
                Familiarity::Seen => history.is_seen(&question.id),
                Familiarity::Unseen => !history.is_seen(&question.id),
            }
    }
}

/// Applies `filter` to `bank`, then its sort if one is set.
pub fn filter_questions<'a>(
    bank: &'a [Question],
    filter: &QuestionFilter,
    history: &ResponseHistory,
) -> Vec<&'a Question> {
    let needle = search_needle(filter.search.as_deref());
    let mut matched: Vec<&Question> = bank
        .iter()
        .filter(|question| filter.matches_with_needle(question, history, needle.as_deref()))
        .collect();

    if let Some(sort) = filter.sort {
        sort_questions(&mut matched, sort, history);
    }
    matched
}

/// Stable sort of a question listing.
pub fn sort_questions(questions: &mut [&Question], sort: QuestionSort, history: &ResponseHistory) {
    questions.sort_by(|a, b| {
        let ordering = match sort.key {
            QuestionSortKey::Id => a
                .id
                .numeric_value()
                .partial_cmp(&b.id.numeric_value())
                .unwrap_or(Ordering::Equal),
            QuestionSortKey::ExamStatus => history
                .has_exam_response(&a.id)
                .cmp(&history.has_exam_response(&b.id)),
            QuestionSortKey::QuizCount => history.quiz_count(&a.id).cmp(&history.quiz_count(&b.id)),
        };
        sort.direction.apply(ordering)
    });
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExamSortKey {
    PublicationDate,
    ExamStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExamSort {
    pub key: ExamSortKey,
    pub direction: SortDirection,
}

impl Default for ExamSort {
    fn default() -> Self {
        Self {
            key: ExamSortKey::PublicationDate,
            direction: SortDirection::Descending,
        }
    }
}

/// Exam-level criteria (papers browser).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExamFilter {
    pub source: Option<String>,
    pub author: Option<String>,
    /// Exam passes when its paper set contains this paper.
    pub paper: Option<String>,
    /// Per group, ANY question of the exam must carry ALL listed tags.
    pub tags: BTreeMap<TagGroup, BTreeSet<String>>,
    /// ANY question of the exam must use one of these terms.
    pub command_terms: BTreeSet<String>,
    /// Needle over exam titles and question/answer text.
    pub search: Option<String>,
    pub sort: ExamSort,
}

/// Filters and orders exams. `exams` is normally `group_exams(bank)`.
pub fn filter_exams(
    bank: &[Question],
    exams: &[Exam],
    filter: &ExamFilter,
    history: &ResponseHistory,
) -> Vec<Exam> {
    let needle = search_needle(filter.search.as_deref());
    let mut matched: Vec<Exam> = exams
        .iter()
        .filter(|exam| {
            let rows = exam_questions(bank, &exam.exam_id);
            equals_if_set(filter.source.as_deref(), Some(exam.source.as_str()))
                && equals_if_set(filter.author.as_deref(), Some(exam.author.as_str()))
                && non_empty(filter.paper.as_deref()).map_or(true, |paper| exam.has_paper(paper))
                && filter
                    .tags
                    .iter()
                    .filter(|(_, required)| !required.is_empty())
                    .all(|(group, required)| {
                        rows.iter().any(|q| q.has_all_tags(*group, required))
                    })
                && (filter.command_terms.is_empty()
                    || rows.iter().any(|q| term_in(&filter.command_terms, q)))
                && needle.as_deref().map_or(true, |needle| {
                    exam.titles
                        .iter()
                        .any(|title| title.to_lowercase().contains(needle))
                        || rows.iter().any(|q| {
                            q.question_text.to_lowercase().contains(needle)
                                || q.answer_text.to_lowercase().contains(needle)
                        })
                })
        })
        .cloned()
        .collect();

    let sort = filter.sort;
    matched.sort_by(|a, b| {
        let ordering = match sort.key {
            ExamSortKey::PublicationDate => a.publication_date.cmp(&b.publication_date),
            ExamSortKey::ExamStatus => history
                .exam_has_responses(&a.exam_id)
                .cmp(&history.exam_has_responses(&b.exam_id)),
        };
        sort.direction.apply(ordering)
    });
    matched
}

/// Distinct values available for each filter, sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub sources: Vec<String>,
    pub authors: Vec<String>,
    pub papers: Vec<String>,
    pub tags: BTreeMap<TagGroup, Vec<String>>,
}

impl FilterOptions {
    pub fn from_bank(bank: &[Question]) -> Self {
        let mut sources = BTreeSet::new();
        let mut authors = BTreeSet::new();
        let mut papers = BTreeSet::new();
        let mut tags: BTreeMap<TagGroup, BTreeSet<String>> = BTreeMap::new();

        for row in bank {
            if let Some(source) = non_empty(row.source.as_deref()) {
                sources.insert(source.to_string());
            }
            if let Some(author) = non_empty(row.author.as_deref()) {
                authors.insert(author.to_string());
            }
            if let Some(paper) = non_empty(row.paper_id.as_deref()) {
                papers.insert(paper.to_string());
            }
            for group in TagGroup::ALL {
                tags.entry(group)
                    .or_default()
                    .extend(row.tags(group).iter().cloned());
            }
        }

        Self {
            sources: sources.into_iter().collect(),
            authors: authors.into_iter().collect(),
            papers: papers.into_iter().collect(),
            tags: tags
                .into_iter()
                .map(|(group, values)| (group, values.into_iter().collect()))
                .collect(),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn equals_if_set(expected: Option<&str>, actual: Option<&str>) -> bool {
    match non_empty(expected) {
        Some(expected) => actual == Some(expected),
        None => true,
    }
}

fn term_in(terms: &BTreeSet<String>, question: &Question) -> bool {
    question
        .command_term
        .as_ref()
        .is_some_and(|term| terms.contains(term))
}

fn search_needle(search: Option<&str>) -> Option<String> {
    non_empty(search).map(|needle| needle.trim().to_lowercase())
}

fn question_text_contains(question: &Question, needle: &str) -> bool {
    question.question_text.to_lowercase().contains(needle)
        || question.answer_text.to_lowercase().contains(needle)
        || question
            .stimulus
            .as_deref()
            .is_some_and(|stimulus| stimulus.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::{equals_if_set, search_needle, Familiarity};

    #[test]
    fn blank_criteria_are_ignored() {
        assert!(equals_if_set(Some("  "), Some("IB")));
        assert!(equals_if_set(None, None));
        assert!(!equals_if_set(Some("IB"), None));
        assert_eq!(search_needle(Some("   ")), None);
        assert_eq!(search_needle(Some(" Data ")).as_deref(), Some("data"));
    }

    #[test]
    fn familiarity_parses_known_values() {
        assert_eq!("SEEN".parse::<Familiarity>().unwrap(), Familiarity::Seen);
        assert_eq!("".parse::<Familiarity>().unwrap(), Familiarity::Both);
        assert!("recent".parse::<Familiarity>().is_err());
    }
}
