//! Question bank store.
//!
//! # Responsibility
//! - Validate uploads and replace the stored bank wholesale.
//! - Load the current bank for every reader.
//!
//! # Invariants
//! - A rejected upload leaves the previous bank untouched.
//! - The bank is written with a single `set`; no partial bank is visible.
//! - `load` never fails: absent or corrupt data reads as an empty bank.

use crate::model::question::{parse_question_bank, BankValidationError, Question};
use crate::repo::kv_repo::{
    read_json_blob, write_json_blob, KeyValueStore, StoreError, StoreResult, BANK_KEY,
};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Upload failure: either the payload or the storage write.
#[derive(Debug)]
pub enum BankUploadError {
    Validation(BankValidationError),
    Store(StoreError),
}

impl Display for BankUploadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "invalid question bank structure: {err}"),
            Self::Store(err) => write!(f, "failed to save question bank: {err}"),
        }
    }
}

impl Error for BankUploadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<BankValidationError> for BankUploadError {
    fn from(value: BankValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for BankUploadError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

pub struct BankStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> BankStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validates `raw` and replaces the stored bank. Returns the question
    /// count on success.
    pub fn upload(&self, raw: &[u8]) -> Result<usize, BankUploadError> {
        let questions = match parse_question_bank(raw) {
            Ok(questions) => questions,
            Err(err) => {
                warn!(
                    "event=bank_upload module=repo status=error error_code=validation_failed bytes={} error={}",
                    raw.len(),
                    err
                );
                return Err(err.into());
            }
        };

        write_json_blob(&self.store, BANK_KEY, &questions)?;
        info!(
            "event=bank_upload module=repo status=ok bytes={} questions={}",
            raw.len(),
            questions.len()
        );
        Ok(questions.len())
    }

    pub fn clear(&self) -> StoreResult<()> {
        self.store.remove(BANK_KEY)?;
        info!("event=bank_clear module=repo status=ok");
        Ok(())
    }

    pub fn load(&self) -> Vec<Question> {
        read_json_blob(&self.store, BANK_KEY)
    }
}
