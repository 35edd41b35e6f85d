//! Filtering and listing over the question bank.

pub mod filter;

pub use filter::{
    filter_exams, filter_questions, sort_questions, ExamFilter, ExamSort, ExamSortKey,
    Familiarity, FilterOptions, QuestionFilter, QuestionSort, QuestionSortKey, SortDirection,
};
