//! Bank upload and destructive resets.

use super::{prompt_line, AppContext};
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct UploadArgs {
    /// JSON file holding an array of questions
    pub path: PathBuf,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearTarget {
    /// The stored question bank
    Bank,
    /// Every quiz and its answers
    Quizzes,
    /// Every saved exam answer
    Exams,
}

impl ClearTarget {
    fn description(self) -> &'static str {
        match self {
            Self::Bank => "the question bank",
            Self::Quizzes => "all quiz responses",
            Self::Exams => "all exam responses",
        }
    }
}

#[derive(Args, Debug)]
pub struct ClearArgs {
    #[arg(value_enum)]
    pub target: ClearTarget,
    /// Skip the confirmation prompt
    #[arg(long, short)]
    pub yes: bool,
}

pub fn upload(ctx: &AppContext, args: UploadArgs) -> Result<()> {
    let raw = std::fs::read(&args.path)
        .with_context(|| format!("reading {}", args.path.display()))?;
    let count = ctx.bank_store().upload(&raw)?;
    println!("Question bank uploaded: {count} questions.");
    Ok(())
}

pub fn clear(ctx: &AppContext, args: ClearArgs) -> Result<()> {
    let what = args.target.description();
    if !args.yes {
        let answer = prompt_line(&format!(
            "This will permanently delete {what}. Type `yes` to continue: "
        ))?;
        if answer.as_deref().map(str::trim) != Some("yes") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    match args.target {
        ClearTarget::Bank => ctx.bank_store().clear()?,
        ClearTarget::Quizzes => ctx.responses().clear_quiz_responses()?,
        ClearTarget::Exams => ctx.responses().clear_exam_responses()?,
    }
    println!("Cleared {what}.");
    Ok(())
}
