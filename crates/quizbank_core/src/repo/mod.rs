//! Storage port and typed stores.
//!
//! # Responsibility
//! - Define the key-value storage contract (`KeyValueStore`).
//! - Map each persisted blob to a typed store (bank, responses, handoff,
//!   preferences).
//!
//! # Invariants
//! - Stores are generic over the port; none of them touches SQLite directly.
//! - Read paths degrade to empty/default values instead of failing.

pub mod bank_repo;
pub mod handoff_repo;
pub mod kv_repo;
pub mod preference_repo;
pub mod response_repo;
