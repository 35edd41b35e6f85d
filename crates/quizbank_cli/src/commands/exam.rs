//! Exam detail view and in-place answering.

use super::{format_last_save, prompt_line, AppContext, Palette};
use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use quizbank_core::model::command_term;
use quizbank_core::service::exam_service::{marks_label, LabelledQuestion};
use quizbank_core::{exam_detail, ExamDetail};

#[derive(Args, Debug)]
pub struct ExamArgs {
    #[command(subcommand)]
    pub command: ExamCommands,
}

#[derive(Subcommand, Debug)]
pub enum ExamCommands {
    /// Print every question of an exam
    Show {
        exam_id: String,
        /// Include mark schemes
        #[arg(long)]
        answers: bool,
    },
    /// Answer an exam's questions one by one
    Answer { exam_id: String },
}

pub fn run(ctx: &AppContext, args: ExamArgs) -> Result<()> {
    match args.command {
        ExamCommands::Show { exam_id, answers } => show(ctx, &exam_id, answers),
        ExamCommands::Answer { exam_id } => answer(ctx, &exam_id),
    }
}

fn load(ctx: &AppContext, exam_id: &str) -> Result<ExamDetail> {
    match exam_detail(&ctx.bank(), exam_id) {
        Some(detail) => Ok(detail),
        None => bail!("no questions found for exam `{exam_id}`"),
    }
}

fn show(ctx: &AppContext, exam_id: &str, with_answers: bool) -> Result<()> {
    let detail = load(ctx, exam_id)?;
    let palette = ctx.palette();
    let saved = ctx.responses().load_exam_responses(exam_id);
    print_header(&detail, &palette);

    for section in &detail.sections {
        println!();
        println!("{}", palette.accent(&format!("== {} ==", section.nav_label)));
        if let Some(stimulus) = &section.stimulus {
            println!("{}", palette.muted(stimulus));
        }
        for item in &section.questions {
            print_question(item, &palette);
            if let Some(response) = saved.iter().find(|r| r.id == item.question.id) {
                println!("  Your answer: {}", response.value);
            }
            if with_answers {
                let answer = if item.question.answer_text.is_empty() {
                    "No answer provided."
                } else {
                    item.question.answer_text.as_str()
                };
                println!("{}", palette.muted(&format!("  Answer: {answer}")));
            }
        }
    }
    Ok(())
}

fn answer(ctx: &AppContext, exam_id: &str) -> Result<()> {
    let detail = load(ctx, exam_id)?;
    let palette = ctx.palette();
    let responses = ctx.responses();
    print_header(&detail, &palette);
    println!("Enter an answer and press return. Empty keeps the saved answer, `:q` stops.");

    for item in detail.questions() {
        println!();
        print_question(item, &palette);
        let saved = responses
            .load_exam_responses(exam_id)
            .into_iter()
            .find(|r| r.id == item.question.id);
        if let Some(saved) = &saved {
            println!("{}", palette.muted(&format!("  Saved: {}", saved.value)));
        }

        let Some(line) = prompt_line("> ")? else {
            break;
        };
        match line.trim() {
            ":q" => break,
            "" => continue,
            _ => {
                let saved_at =
                    responses.save_exam_response(exam_id, item.question.id.clone(), line)?;
                println!("{}", palette.muted(&format_last_save(Some(saved_at))));
            }
        }
    }
    Ok(())
}

fn print_header(detail: &ExamDetail, palette: &Palette) {
    let meta = &detail.meta;
    println!("{}", palette.accent(&format!("Exam {}", meta.exam_id)));
    println!(
        "Paper: {}  Source: {}  Author: {}  Published: {}  Level: {}",
        meta.paper_id.as_deref().map(|p| format!("Paper {p}")).unwrap_or_default(),
        meta.source.as_deref().unwrap_or_default(),
        meta.author.as_deref().unwrap_or_default(),
        meta.publication_date.as_deref().unwrap_or_default(),
        meta.level.as_deref().unwrap_or_default()
    );
}

fn print_question(item: &LabelledQuestion, palette: &Palette) {
    let question = &item.question;
    let term = question.command_term().unwrap_or_default();
    println!(
        "{} {}{}",
        palette.muted(&item.label),
        palette.accent(term),
        marks_label(question.marks)
    );
    if let Some(definition) = command_term::definition(term) {
        println!("{}", palette.muted(&format!("  ({term}: {definition})")));
    }
    println!("{}", question.question_text);
}
