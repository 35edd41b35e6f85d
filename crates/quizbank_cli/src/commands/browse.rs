//! Question browsing and filter discovery.

use super::{truncate, AppContext, FilterArgs};
use anyhow::Result;
use clap::{Args, ValueEnum};
use quizbank_core::search::filter::{QuestionSort, QuestionSortKey, SortDirection};
use quizbank_core::{filter_questions, FilterOptions, TagGroup};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortArg {
    Id,
    ExamStatus,
    QuizCount,
}

#[derive(Args, Debug)]
pub struct BrowseArgs {
    #[command(flatten)]
    pub filters: FilterArgs,
    /// Text searched in question, answer and stimulus
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long, value_enum)]
    pub sort: Option<SortArg>,
    /// Sort descending
    #[arg(long, requires = "sort")]
    pub desc: bool,
    /// Print full question and answer text
    #[arg(long)]
    pub full: bool,
}

pub fn questions(ctx: &AppContext, args: BrowseArgs) -> Result<()> {
    let bank = ctx.bank();
    if bank.is_empty() {
        println!("No question bank loaded. Run `quizbank upload <file>` first.");
        return Ok(());
    }

    let mut filter = args.filters.to_filter();
    filter.search = args.search;
    filter.sort = args.sort.map(|key| QuestionSort {
        key: match key {
            SortArg::Id => QuestionSortKey::Id,
            SortArg::ExamStatus => QuestionSortKey::ExamStatus,
            SortArg::QuizCount => QuestionSortKey::QuizCount,
        },
        direction: if args.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        },
    });

    let history = ctx.responses().history();
    let matched = filter_questions(&bank, &filter, &history);
    let palette = ctx.palette();

    println!("{} of {} questions", matched.len(), bank.len());
    println!(
        "{:<8} {:<6} {:<12} {:<5} {:<5} QUESTION",
        "ID", "PAPER", "TERM", "EXAM", "QUIZ"
    );
    for question in matched {
        let exam_mark = if history.has_exam_response(&question.id) {
            "yes"
        } else {
            "-"
        };
        let text = if args.full {
            question.question_text.clone()
        } else {
            truncate(&question.question_text, 60)
        };
        println!(
            "{:<8} {:<6} {:<12} {:<5} {:<5} {}",
            question.id.as_str(),
            question.paper_id.as_deref().unwrap_or("-"),
            question.command_term().unwrap_or("-"),
            exam_mark,
            history.quiz_count(&question.id),
            text
        );
        if args.full {
            println!("{}", palette.muted(&format!("  Answer: {}", question.answer_text)));
        }
    }
    Ok(())
}

pub fn filters(ctx: &AppContext) -> Result<()> {
    let options = FilterOptions::from_bank(&ctx.bank());
    print_values("Sources", &options.sources);
    print_values("Authors", &options.authors);
    print_values("Papers", &options.papers);
    for group in TagGroup::ALL {
        let values = options.tags.get(&group).cloned().unwrap_or_default();
        print_values(&format!("{} tags", group.label()), &values);
    }
    Ok(())
}

fn print_values(heading: &str, values: &[String]) {
    if values.is_empty() {
        println!("{heading}: (none)");
    } else {
        println!("{heading}: {}", values.join(", "));
    }
}
