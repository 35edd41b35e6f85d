//! Subcommand implementations and the state they share.

pub mod browse;
pub mod dashboard;
pub mod exam;
pub mod manage;
pub mod papers;
pub mod quiz;
pub mod theme;

use anyhow::{Context, Result};
use chrono::{DateTime, Local, Utc};
use clap::{Args, ValueEnum};
use quizbank_core::{
    init_logging, AppConfig, BankStore, MemoryKeyValueStore, PreferenceStore, Question,
    QuestionFilter, QuizHandoff, QuizService, ResponseStore, SqliteKeyValueStore, TagGroup,
    Theme,
};
use std::io::{BufRead, Write};
use std::path::Path;
use std::sync::Arc;

/// Opened configuration, durable store and this process's session store.
///
/// The quiz handoff lives in `session`, so it never outlives the process
/// that built the quiz.
pub struct AppContext {
    pub config: AppConfig,
    pub store: Arc<SqliteKeyValueStore>,
    session: MemoryKeyValueStore,
}

impl AppContext {
    pub fn open(config_path: Option<&Path>) -> Result<Self> {
        let config = AppConfig::load(config_path).context("loading configuration")?;
        std::fs::create_dir_all(&config.data_dir).with_context(|| {
            format!("creating data directory {}", config.data_dir.display())
        })?;
        init_logging(&config.log_level, &config.log_dir()).context("starting logging")?;

        let db_path = config.db_path();
        let store = SqliteKeyValueStore::open(&db_path)
            .with_context(|| format!("opening store {}", db_path.display()))?;
        Ok(Self::with_store(config, Arc::new(store)))
    }

    pub fn with_store(config: AppConfig, store: Arc<SqliteKeyValueStore>) -> Self {
        Self {
            config,
            store,
            session: MemoryKeyValueStore::new(),
        }
    }

    pub fn bank(&self) -> Vec<Question> {
        BankStore::new(&*self.store).load()
    }

    pub fn bank_store(&self) -> BankStore<&SqliteKeyValueStore> {
        BankStore::new(&*self.store)
    }

    pub fn responses(&self) -> ResponseStore<&SqliteKeyValueStore> {
        ResponseStore::new(&*self.store)
    }

    pub fn quiz_service(&self) -> QuizService<&SqliteKeyValueStore, &MemoryKeyValueStore> {
        QuizService::new(&*self.store, &self.session)
    }

    pub fn handoff(&self) -> QuizHandoff<&MemoryKeyValueStore> {
        QuizHandoff::new(&self.session)
    }

    pub fn palette(&self) -> Palette {
        Palette::for_theme(PreferenceStore::new(&*self.store).theme())
    }
}

/// ANSI accents for the stored theme.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    accent: &'static str,
    muted: &'static str,
}

impl Palette {
    const RESET: &'static str = "\x1b[0m";

    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                accent: "\x1b[95m",
                muted: "\x1b[2m",
            },
            Theme::Light => Self {
                accent: "\x1b[34m",
                muted: "\x1b[90m",
            },
        }
    }

    pub fn accent(&self, text: &str) -> String {
        format!("{}{}{}", self.accent, text, Self::RESET)
    }

    pub fn muted(&self, text: &str) -> String {
        format!("{}{}{}", self.muted, text, Self::RESET)
    }
}

/// Question-level filter flags shared by `questions` and `quiz custom`.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Exact source
    #[arg(long)]
    pub source: Option<String>,
    /// Exact author
    #[arg(long)]
    pub author: Option<String>,
    /// Paper id (1, 2, 3, ...)
    #[arg(long)]
    pub paper: Option<String>,
    /// Required concept tag (repeatable, all must match)
    #[arg(long = "concept")]
    pub concepts: Vec<String>,
    /// Required content tag (repeatable, all must match)
    #[arg(long = "content")]
    pub content: Vec<String>,
    /// Required context tag (repeatable, all must match)
    #[arg(long = "context")]
    pub contexts: Vec<String>,
    /// Required challenge tag (repeatable, all must match)
    #[arg(long = "challenge")]
    pub challenges: Vec<String>,
    /// Accepted command term (repeatable, any may match)
    #[arg(long = "term")]
    pub command_terms: Vec<String>,
    /// Quiz familiarity
    #[arg(long, value_enum, default_value_t = FamiliarityArg::Both)]
    pub familiarity: FamiliarityArg,
}

impl FilterArgs {
    pub fn to_filter(&self) -> QuestionFilter {
        let mut filter = QuestionFilter {
            source: self.source.clone(),
            author: self.author.clone(),
            paper: self.paper.clone(),
            familiarity: self.familiarity.into(),
            ..QuestionFilter::default()
        };
        for (group, tags) in [
            (TagGroup::Concept, &self.concepts),
            (TagGroup::Content, &self.content),
            (TagGroup::Context, &self.contexts),
            (TagGroup::Challenge, &self.challenges),
        ] {
            if !tags.is_empty() {
                filter = filter.require_tags(group, tags.iter().cloned());
            }
        }
        filter.with_command_terms(self.command_terms.iter().cloned())
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FamiliarityArg {
    #[default]
    Both,
    Seen,
    Unseen,
}

impl From<FamiliarityArg> for quizbank_core::Familiarity {
    fn from(value: FamiliarityArg) -> Self {
        match value {
            FamiliarityArg::Both => Self::Both,
            FamiliarityArg::Seen => Self::Seen,
            FamiliarityArg::Unseen => Self::Unseen,
        }
    }
}

/// Prints `prompt` and reads one line; `None` on end of input.
pub fn prompt_line(prompt: &str) -> Result<Option<String>> {
    let mut stdout = std::io::stdout();
    write!(stdout, "{prompt}")?;
    stdout.flush()?;

    let mut line = String::new();
    let read = std::io::stdin().lock().read_line(&mut line)?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Renders epoch milliseconds as a local time of day.
pub fn format_last_save(last_save: Option<i64>) -> String {
    match last_save.and_then(DateTime::<Utc>::from_timestamp_millis) {
        Some(saved) => format!(
            "Last saved: {}",
            saved.with_timezone(&Local).format("%H:%M:%S")
        ),
        None => "Last saved: Never".to_string(),
    }
}

/// Shortens long text for table cells.
pub fn truncate(value: &str, max_chars: usize) -> String {
    let flattened = value.replace(['\n', '\r'], " ");
    if flattened.chars().count() <= max_chars {
        return flattened;
    }
    let mut cut: String = flattened.chars().take(max_chars.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
