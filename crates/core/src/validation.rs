//! Input validation utilities.
//!
//! This module contains functions for validating user inputs before they reach the
//! interaction engine.

use crate::constants::MAX_DRUG_NAME_CHARS;
use crate::{RxError, RxResult};
use aurum_types::NonEmptyText;

/// Validates a drug name supplied by a caller.
///
/// The name is trimmed; the original casing is kept for display.
/// - Rejects empty or whitespace-only strings
/// - Bounds the length to avoid pathological inputs
/// - Rejects control characters
///
/// # Arguments
///
/// * `field` - Name of the input field, used in the error message.
/// * `name` - The drug name to validate.
///
/// # Errors
///
/// Returns `RxError::InvalidInput` if the name is invalid.
pub fn validate_drug_name(field: &str, name: &str) -> RxResult<NonEmptyText> {
    NonEmptyText::bounded(name, MAX_DRUG_NAME_CHARS)
        .map_err(|e| RxError::InvalidInput(format!("{field}: {e}")))
}

/// Prepares the list of current medications for resolution.
///
/// Entries are trimmed and blank entries are skipped. Order and duplicates are kept. Entries
/// are not otherwise checked; a name that matches nothing simply resolves to no record.
pub fn prepare_medications(medications: &[String]) -> Vec<NonEmptyText> {
    medications
        .iter()
        .filter_map(|m| NonEmptyText::new(m).ok())
        .collect()
}
