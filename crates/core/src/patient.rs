//! Patient context supplied alongside an analysis request.
//!
//! The context is informational: it never changes which interaction records are found. It is
//! still coerced strictly, so a malformed field is reported instead of silently defaulted.

use crate::constants::MAX_PATIENT_AGE;
use crate::{RxError, RxResult};

/// Age exactly as it arrived from the caller, before coercion.
#[derive(Clone, Debug, PartialEq)]
pub enum AgeInput {
    Integer(i64),
    Decimal(f64),
    Text(String),
    /// Any other value (boolean, list, object), kept as its textual form for error reporting.
    Unsupported(String),
}

/// Patient context as supplied by a caller, before validation.
///
/// List fields typically come from comma-separated form inputs and may contain blank entries.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawPatientContext {
    pub age: Option<AgeInput>,
    pub sex: Option<String>,
    pub disease: Option<String>,
    pub ethnicity: Option<String>,
    pub past_medications: Vec<String>,
    pub current_medications: Vec<String>,
    pub supplements: Vec<String>,
    pub allergies: Vec<String>,
    pub adverse_events: Vec<String>,
    pub family_history: Vec<String>,
}

/// Validated patient context.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PatientContext {
    /// Age in whole years.
    pub age: Option<u8>,
    pub sex: Option<String>,
    /// Primary disease or condition.
    pub disease: Option<String>,
    pub ethnicity: Option<String>,
    pub past_medications: Vec<String>,
    pub current_medications: Vec<String>,
    pub supplements: Vec<String>,
    pub allergies: Vec<String>,
    pub adverse_events: Vec<String>,
    pub family_history: Vec<String>,
}

impl PatientContext {
    /// Coerce a raw context.
    ///
    /// - Text fields are trimmed; blank text becomes `None`.
    /// - List entries are trimmed and blank entries dropped; order and duplicates are kept.
    /// - Age is parsed by [`parse_age`].
    ///
    /// # Errors
    ///
    /// Returns `RxError::MalformedContext` if the age cannot be coerced.
    pub fn from_raw(raw: RawPatientContext) -> RxResult<Self> {
        let age = match raw.age {
            Some(input) => parse_age(&input)?,
            None => None,
        };

        Ok(Self {
            age,
            sex: clean_text(raw.sex),
            disease: clean_text(raw.disease),
            ethnicity: clean_text(raw.ethnicity),
            past_medications: clean_list(raw.past_medications),
            current_medications: clean_list(raw.current_medications),
            supplements: clean_list(raw.supplements),
            allergies: clean_list(raw.allergies),
            adverse_events: clean_list(raw.adverse_events),
            family_history: clean_list(raw.family_history),
        })
    }
}

/// Coerce an age input to whole years.
///
/// Blank text means "not provided" and yields `None`. Whole numbers in `0..=MAX_PATIENT_AGE`
/// are accepted, whether sent as integers, integral decimals (`42.0`) or numeric text.
///
/// # Errors
///
/// Returns `RxError::MalformedContext` for non-numeric text, fractional or non-finite values,
/// and values outside the accepted range.
pub fn parse_age(input: &AgeInput) -> RxResult<Option<u8>> {
    let years: i64 = match input {
        AgeInput::Integer(n) => *n,
        AgeInput::Decimal(f) => {
            if !f.is_finite() || f.fract() != 0.0 {
                return Err(RxError::MalformedContext(format!(
                    "age must be a whole number of years, got {f}"
                )));
            }
            if *f < i64::MIN as f64 || *f > i64::MAX as f64 {
                return Err(age_out_of_range(&f.to_string()));
            }
            *f as i64
        }
        AgeInput::Text(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed.parse::<i64>().map_err(|_| {
                RxError::MalformedContext(format!("age must be numeric, got {trimmed:?}"))
            })?
        }
        AgeInput::Unsupported(value) => {
            return Err(RxError::MalformedContext(format!(
                "age must be a number or numeric text, got {value}"
            )));
        }
    };

    if !(0..=i64::from(MAX_PATIENT_AGE)).contains(&years) {
        return Err(age_out_of_range(&years.to_string()));
    }

    u8::try_from(years)
        .map(Some)
        .map_err(|_| age_out_of_range(&years.to_string()))
}

fn age_out_of_range(value: &str) -> RxError {
    RxError::MalformedContext(format!(
        "age must be between 0 and {MAX_PATIENT_AGE}, got {value}"
    ))
}

fn clean_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn clean_list(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}
