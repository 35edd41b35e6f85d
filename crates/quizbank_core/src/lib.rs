//! Core domain logic for the quiz bank.
//! This crate owns every business rule; front ends only render and collect
//! input.

pub mod clock;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{AppConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::exam::{exam_questions, group_exams, Exam};
pub use model::history::ResponseHistory;
pub use model::question::{
    parse_question_bank, BankValidationError, Question, QuestionId, TagGroup,
};
pub use model::quiz::{
    ExamResponseEntry, Quiz, QuizConfig, QuizEntry, QuizId, ResponseEntry,
};
pub use repo::bank_repo::{BankStore, BankUploadError};
pub use repo::handoff_repo::{HandoffQuiz, QuizHandoff};
pub use repo::kv_repo::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StoreError, StoreResult,
};
pub use repo::preference_repo::{PreferenceStore, Theme};
pub use repo::response_repo::ResponseStore;
pub use search::filter::{
    filter_exams, filter_questions, ExamFilter, Familiarity, FilterOptions, QuestionFilter,
};
pub use service::aggregate_service::{
    aggregate, dashboard_overview, AggregateDimension, CategoryAggregate, DashboardOverview,
};
pub use service::autosave::{Autosave, AutosaveError, DEFAULT_AUTOSAVE_INTERVAL};
pub use service::exam_service::{exam_detail, ExamDetail};
pub use service::quiz_service::{CustomQuizRequest, QuizBuildError, QuizService};
pub use service::quiz_session::QuizSession;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
