//! Exam (past paper) listing.

use super::AppContext;
use anyhow::Result;
use clap::{Args, ValueEnum};
use quizbank_core::search::filter::{ExamSort, ExamSortKey, SortDirection};
use quizbank_core::{filter_exams, group_exams, ExamFilter, TagGroup};

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExamSortArg {
    #[default]
    Date,
    Status,
}

#[derive(Args, Debug)]
pub struct PapersArgs {
    #[arg(long)]
    pub source: Option<String>,
    #[arg(long)]
    pub author: Option<String>,
    #[arg(long)]
    pub paper: Option<String>,
    /// Concept tag some question must carry (repeatable)
    #[arg(long = "concept")]
    pub concepts: Vec<String>,
    /// Content tag some question must carry (repeatable)
    #[arg(long = "content")]
    pub content: Vec<String>,
    /// Context tag some question must carry (repeatable)
    #[arg(long = "context")]
    pub contexts: Vec<String>,
    /// Command term some question must use (repeatable)
    #[arg(long = "term")]
    pub command_terms: Vec<String>,
    /// Text searched in titles, questions and answers
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long, value_enum, default_value_t)]
    pub sort: ExamSortArg,
    /// Sort ascending (default is descending)
    #[arg(long)]
    pub asc: bool,
}

impl PapersArgs {
    fn to_filter(&self) -> ExamFilter {
        let mut filter = ExamFilter {
            source: self.source.clone(),
            author: self.author.clone(),
            paper: self.paper.clone(),
            command_terms: self.command_terms.iter().cloned().collect(),
            search: self.search.clone(),
            sort: ExamSort {
                key: match self.sort {
                    ExamSortArg::Date => ExamSortKey::PublicationDate,
                    ExamSortArg::Status => ExamSortKey::ExamStatus,
                },
                direction: if self.asc {
                    SortDirection::Ascending
                } else {
                    SortDirection::Descending
                },
            },
            ..ExamFilter::default()
        };
        for (group, tags) in [
            (TagGroup::Concept, &self.concepts),
            (TagGroup::Content, &self.content),
            (TagGroup::Context, &self.contexts),
        ] {
            if !tags.is_empty() {
                filter.tags.insert(group, tags.iter().cloned().collect());
            }
        }
        filter
    }
}

pub fn run(ctx: &AppContext, args: PapersArgs) -> Result<()> {
    let bank = ctx.bank();
    let exams = group_exams(&bank);
    let history = ctx.responses().history();
    let listed = filter_exams(&bank, &exams, &args.to_filter(), &history);
    let palette = ctx.palette();

    println!("{} of {} exams", listed.len(), exams.len());
    for exam in listed {
        let status = if history.exam_has_responses(&exam.exam_id) {
            palette.accent("answered")
        } else {
            palette.muted("not started")
        };
        println!(
            "{:<10} {:<12} {:<10} {:<12} papers={} [{}]",
            exam.exam_id,
            exam.publication_date,
            exam.source,
            exam.author,
            exam.papers.join(","),
            status
        );
        for title in &exam.titles {
            println!("    {}", palette.muted(title));
        }
    }
    Ok(())
}
