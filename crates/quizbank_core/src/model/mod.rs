//! Domain model for the question bank, quizzes and saved answers.
//!
//! # Responsibility
//! - Define canonical record shapes shared by stores, filters and services.
//! - Validate bank uploads once at ingestion.
//!
//! # Invariants
//! - Questions are immutable once loaded; replacement is whole-bank only.
//! - Derived views (exams, response history) are recomputed, never stored.

pub mod command_term;
pub mod exam;
pub mod history;
pub mod question;
pub mod quiz;
mod wire;
