//! Quiz generation, review and answering.

use super::{format_last_save, prompt_line, AppContext, FilterArgs, Palette};
use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use log::info;
use quizbank_core::service::exam_service::marks_label;
use quizbank_core::service::quiz_service::parse_quiz_size;
use quizbank_core::{
    Autosave, CustomQuizRequest, Question, QuizConfig, QuizId, QuizSession, ResponseStore,
    StoreError,
};
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Args, Debug)]
pub struct QuizArgs {
    #[command(subcommand)]
    pub command: QuizCommands,
}

#[derive(Subcommand, Debug)]
pub enum QuizCommands {
    /// Generate a quiz from filters
    Custom {
        #[command(flatten)]
        filters: FilterArgs,
        /// Number of questions (1-100)
        #[arg(long, short = 'n', default_value = "10")]
        count: String,
    },
    /// Generate a quiz on one random content tag
    Random {
        /// Number of questions (1-100)
        #[arg(long, short = 'n', default_value = "10")]
        count: String,
    },
    /// List stored quizzes
    List,
    /// Print a quiz with its saved answers
    Show { quiz_id: QuizId },
    /// Answer a quiz interactively with autosave
    Answer { quiz_id: QuizId },
}

pub fn run(ctx: &AppContext, args: QuizArgs) -> Result<()> {
    match args.command {
        QuizCommands::Custom { filters, count } => {
            let count = parse_quiz_size(&count)?;
            let request = CustomQuizRequest {
                filter: filters.to_filter(),
                count: i64::try_from(count)?,
            };
            let bank = ctx.bank();
            let quiz = ctx
                .quiz_service()
                .build_custom_quiz(&bank, &request, &mut rand::thread_rng())?;
            report_created(quiz.id, quiz.questions.len());
            Ok(())
        }
        QuizCommands::Random { count } => {
            let count = parse_quiz_size(&count)?;
            let bank = ctx.bank();
            let quiz = ctx.quiz_service().build_random_quiz(
                &bank,
                i64::try_from(count)?,
                &mut rand::thread_rng(),
            )?;
            report_created(quiz.id, quiz.questions.len());
            Ok(())
        }
        QuizCommands::List => list(ctx),
        QuizCommands::Show { quiz_id } => show(ctx, quiz_id),
        QuizCommands::Answer { quiz_id } => answer(ctx, quiz_id),
    }
}

fn report_created(quiz_id: QuizId, question_count: usize) {
    if question_count == 0 {
        println!("Quiz {quiz_id} created, but no questions matched.");
    } else {
        println!("Quiz {quiz_id} created with {question_count} questions.");
    }
    println!("Answer it with `quizbank quiz answer {quiz_id}`.");
}

fn list(ctx: &AppContext) -> Result<()> {
    let quizzes = ctx.responses().quizzes();
    if quizzes.is_empty() {
        println!("No quizzes yet.");
        return Ok(());
    }
    for (quiz_id, entry) in quizzes {
        let answered = entry
            .responses
            .iter()
            .filter(|r| !r.value.trim().is_empty())
            .count();
        let total = entry.questions.len().max(entry.responses.len());
        println!(
            "Quiz {:<4} {:>3}/{:<3} answered  {}  {}",
            quiz_id,
            answered,
            total,
            describe_config(entry.config.as_ref()),
            format_last_save(entry.last_save)
        );
    }
    Ok(())
}

fn open_session(ctx: &AppContext, bank: &[Question], quiz_id: QuizId) -> Result<QuizSession> {
    match QuizSession::open(quiz_id, bank, &ctx.responses(), &ctx.handoff()) {
        Some(session) => Ok(session),
        None => bail!("quiz {quiz_id} has no questions available"),
    }
}

fn show(ctx: &AppContext, quiz_id: QuizId) -> Result<()> {
    let bank = ctx.bank();
    let session = open_session(ctx, &bank, quiz_id)?;
    let palette = ctx.palette();

    println!("{}", palette.accent(&format!("Quiz {quiz_id}")));
    println!("{}", describe_config(session.config()));
    println!("{}", format_last_save(session.last_save()));
    for (index, (question, answer)) in session
        .questions()
        .iter()
        .zip(session.answers())
        .enumerate()
    {
        println!();
        print_question(index, question, &palette);
        if !answer.is_empty() {
            println!("  Your answer: {answer}");
        }
        println!("{}", palette.muted(&format!("  Answer: {}", question.answer_text)));
    }
    Ok(())
}

const ANSWER_HELP: &str = "Type an answer and press return to record it. Commands: \
    :n next, :p previous, :g <n> go to, :a show answer, :s save, :q save and quit";

fn answer(ctx: &AppContext, quiz_id: QuizId) -> Result<()> {
    let bank = ctx.bank();
    let session = Arc::new(Mutex::new(open_session(ctx, &bank, quiz_id)?));
    let palette = ctx.palette();

    let mut autosave = Autosave::new(ctx.config.autosave_interval);
    {
        let session = Arc::clone(&session);
        let store = Arc::clone(&ctx.store);
        autosave
            .start(move || -> Result<(), StoreError> {
                let responses = ResponseStore::new(&*store);
                let mut session = session.lock().unwrap_or_else(PoisonError::into_inner);
                session.save(&responses).map(|_| ())
            })
            .context("starting autosave")?;
    }

    let question_count = lock(&session).questions().len();
    println!("{}", palette.accent(&format!("Quiz {quiz_id}")));
    println!("{}", format_last_save(lock(&session).last_save()));
    println!("{ANSWER_HELP}");

    let mut current = 0;
    loop {
        {
            let session = lock(&session);
            println!();
            print_question(current, &session.questions()[current], &palette);
            let existing = &session.answers()[current];
            if !existing.is_empty() {
                println!("{}", palette.muted(&format!("  Current answer: {existing}")));
            }
        }

        let Some(line) = prompt_line(&format!("[{}/{}] > ", current + 1, question_count))? else {
            break;
        };
        let command = line.trim();
        match command {
            ":q" => break,
            ":n" | "" => current = (current + 1).min(question_count - 1),
            ":p" => current = current.saturating_sub(1),
            ":a" => {
                let session = lock(&session);
                let answer = &session.questions()[current].answer_text;
                println!("{}", palette.muted(&format!("  Answer: {answer}")));
            }
            ":s" => {
                let saved_at = save_now(ctx, &session)?;
                println!("{}", palette.muted(&format_last_save(Some(saved_at))));
            }
            _ if command.starts_with(":g") => {
                match command[2..].trim().parse::<usize>() {
                    Ok(number) if (1..=question_count).contains(&number) => current = number - 1,
                    _ => println!("Enter a question number between 1 and {question_count}."),
                }
            }
            _ => {
                lock(&session).set_answer(current, line.as_str());
                if current + 1 < question_count {
                    current += 1;
                }
            }
        }
    }

    autosave.stop();
    let saved_at = save_now(ctx, &session)?;
    info!(
        "event=quiz_answer module=cli status=ok quiz_id={} questions={}",
        quiz_id, question_count
    );
    println!("{}", format_last_save(Some(saved_at)));
    Ok(())
}

fn lock(session: &Mutex<QuizSession>) -> std::sync::MutexGuard<'_, QuizSession> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

fn save_now(ctx: &AppContext, session: &Mutex<QuizSession>) -> Result<i64> {
    Ok(lock(session).save(&ctx.responses())?)
}

fn print_question(index: usize, question: &Question, palette: &Palette) {
    let term = question.command_term().unwrap_or_default();
    println!(
        "{} {}{}",
        palette.muted(&format!("Q{}", index + 1)),
        palette.accent(term),
        marks_label(question.marks)
    );
    if let Some(stimulus) = question.stimulus.as_deref().filter(|s| !s.is_empty()) {
        println!("{}", palette.muted(stimulus));
    }
    println!("{}", question.question_text);
}

fn describe_config(config: Option<&QuizConfig>) -> String {
    let Some(config) = config else {
        return "(no filters recorded)".to_string();
    };
    let mut parts = Vec::new();
    for (label, value) in [
        ("source", &config.source),
        ("author", &config.author),
        ("paper", &config.paper),
    ] {
        if !value.is_empty() {
            parts.push(format!("{label}={value}"));
        }
    }
    for (group, tags) in &config.tags {
        if !tags.is_empty() {
            parts.push(format!("{}={}", group.label().to_lowercase(), tags.join("+")));
        }
    }
    if !config.command_terms.is_empty() {
        parts.push(format!("terms={}", config.command_terms.join("|")));
    }
    parts.push(format!("n={}", config.num_questions));
    parts.join(" ")
}
