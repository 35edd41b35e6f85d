//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into use-case level APIs.
//! - Keep the CLI decoupled from storage details.

pub mod aggregate_service;
pub mod autosave;
pub mod exam_service;
pub mod quiz_service;
pub mod quiz_session;
