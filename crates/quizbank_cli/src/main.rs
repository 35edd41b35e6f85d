//! `quizbank` command-line front end.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

use commands::AppContext;

#[derive(Parser)]
#[command(name = "quizbank", about = "Question bank study tool")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Replace the question bank with a JSON file
    Upload(commands::manage::UploadArgs),
    /// Delete stored data
    Clear(commands::manage::ClearArgs),
    /// Browse and filter questions
    Questions(commands::browse::BrowseArgs),
    /// List values available to filters
    Filters,
    /// List exams (past papers)
    Papers(commands::papers::PapersArgs),
    /// View or answer one exam
    Exam(commands::exam::ExamArgs),
    /// Generate, review and answer quizzes
    Quiz(commands::quiz::QuizArgs),
    /// Per-paper command term and tag metrics
    Dashboard,
    /// Show or change the display theme
    Theme(commands::theme::ThemeArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let ctx = AppContext::open(cli.config.as_deref())?;

    match cli.command {
        Commands::Upload(args) => commands::manage::upload(&ctx, args),
        Commands::Clear(args) => commands::manage::clear(&ctx, args),
        Commands::Questions(args) => commands::browse::questions(&ctx, args),
        Commands::Filters => commands::browse::filters(&ctx),
        Commands::Papers(args) => commands::papers::run(&ctx, args),
        Commands::Exam(args) => commands::exam::run(&ctx, args),
        Commands::Quiz(args) => commands::quiz::run(&ctx, args),
        Commands::Dashboard => commands::dashboard::run(&ctx),
        Commands::Theme(args) => commands::theme::run(&ctx, args),
    }
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
