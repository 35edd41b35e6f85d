//! Per-paper category aggregates for the dashboard.
//!
//! # Responsibility
//! - Count command terms or tags per paper, optionally over a fixed
//!   category list.
//! - Derive total, distinct-used and most-common metrics from those counts.
//!
//! # Invariants
//! - `total == counts.iter().map(|(_, n)| n).sum()`.
//! - `most_common` is strictly the highest count; ties keep the category
//!   that comes first in category order.

use crate::model::question::{Question, TagGroup};
use std::collections::BTreeSet;

/// Papers shown on the dashboard.
pub const DASHBOARD_PAPERS: [&str; 3] = ["1", "2", "3"];

pub const CONCEPT_CATEGORIES: [&str; 7] = [
    "change",
    "expression",
    "identity",
    "power",
    "space",
    "systems",
    "values and ethics",
];

pub const CONTENT_CATEGORIES: [&str; 7] = [
    "algorithms",
    "artificial intelligence",
    "computers",
    "data",
    "media",
    "networks and the internet",
    "robots and autonomous technologies",
];

pub const CONTEXT_CATEGORIES: [&str; 7] = [
    "cultural",
    "economic",
    "environmental",
    "health",
    "human knowledge",
    "political",
    "social",
];

/// What each question contributes to the counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateDimension {
    /// The question's command term (at most one per question).
    CommandTerm,
    /// Every tag of one group.
    Tags(TagGroup),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryAggregate {
    /// Category counts in category order.
    pub counts: Vec<(String, usize)>,
    /// Questions on the paper.
    pub question_count: usize,
    /// Sum of all counts.
    pub total: usize,
    /// Categories with a non-zero count.
    pub unique_used: usize,
    pub most_common: Option<String>,
}

impl CategoryAggregate {
    pub fn count_of(&self, category: &str) -> usize {
        self.counts
            .iter()
            .find(|(name, _)| name == category)
            .map_or(0, |(_, count)| *count)
    }

    /// Counts ordered alphabetically, the order charts are drawn in.
    pub fn sorted_counts(&self) -> Vec<(&str, usize)> {
        let mut sorted: Vec<(&str, usize)> = self
            .counts
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
            .collect();
        sorted.sort_by(|a, b| a.0.cmp(b.0));
        sorted
    }
}

/// Aggregates one dimension over the questions of `paper_id`.
///
/// With `categories`, counts are pre-seeded to zero in that order and values
/// outside the list are ignored. Without it, categories appear in
/// first-encountered order.
pub fn aggregate(
    bank: &[Question],
    paper_id: &str,
    dimension: AggregateDimension,
    categories: Option<&[&str]>,
) -> CategoryAggregate {
    let mut counts: Vec<(String, usize)> = categories
        .unwrap_or_default()
        .iter()
        .map(|category| (category.to_string(), 0))
        .collect();
    let fixed = categories.is_some();
    let mut question_count = 0;

    for question in bank
        .iter()
        .filter(|q| q.paper_id.as_deref() == Some(paper_id))
    {
        question_count += 1;
        let values: Vec<&str> = match dimension {
            AggregateDimension::CommandTerm => question.command_term().into_iter().collect(),
            AggregateDimension::Tags(group) => {
                question.tags(group).iter().map(String::as_str).collect()
            }
        };
        for value in values {
            match counts.iter_mut().find(|(name, _)| name == value) {
                Some((_, count)) => *count += 1,
                None if !fixed => counts.push((value.to_string(), 1)),
                None => {}
            }
        }
    }

    let total = counts.iter().map(|(_, count)| count).sum();
    let unique_used = counts.iter().filter(|(_, count)| *count > 0).count();
    let mut most_common: Option<(&str, usize)> = None;
    for (name, count) in &counts {
        if *count > most_common.map_or(0, |(_, best)| best) {
            most_common = Some((name.as_str(), *count));
        }
    }

    CategoryAggregate {
        most_common: most_common.map(|(name, _)| name.to_string()),
        counts,
        question_count,
        total,
        unique_used,
    }
}

/// Dashboard metrics for one paper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperOverview {
    pub paper_id: String,
    pub command_terms: CategoryAggregate,
    pub concepts: CategoryAggregate,
    pub content: CategoryAggregate,
    pub contexts: CategoryAggregate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardOverview {
    pub total_questions: usize,
    /// Distinct `(ExamID, PaperID)` pairs, missing values counted as empty.
    pub total_papers: usize,
    pub papers: Vec<PaperOverview>,
}

pub fn dashboard_overview(bank: &[Question]) -> DashboardOverview {
    let total_papers = bank
        .iter()
        .map(|q| {
            (
                q.exam_id.as_deref().unwrap_or_default(),
                q.paper_id.as_deref().unwrap_or_default(),
            )
        })
        .collect::<BTreeSet<_>>()
        .len();

    let papers = DASHBOARD_PAPERS
        .iter()
        .map(|paper_id| PaperOverview {
            paper_id: paper_id.to_string(),
            command_terms: aggregate(bank, paper_id, AggregateDimension::CommandTerm, None),
            concepts: aggregate(
                bank,
                paper_id,
                AggregateDimension::Tags(TagGroup::Concept),
                Some(&CONCEPT_CATEGORIES[..]),
            ),
            content: aggregate(
                bank,
                paper_id,
                AggregateDimension::Tags(TagGroup::Content),
                Some(&CONTENT_CATEGORIES[..]),
            ),
            contexts: aggregate(
                bank,
                paper_id,
                AggregateDimension::Tags(TagGroup::Context),
                Some(&CONTEXT_CATEGORIES[..]),
            ),
        })
        .collect();

    DashboardOverview {
        total_questions: bank.len(),
        total_papers,
        papers,
    }
}
