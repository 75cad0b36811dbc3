//! Constants used throughout the AurumRx core crate.
//!
//! Input bounds and startup defaults live here so that the REST boundary, the CLI and the
//! engine agree on them.

/// Default bind address for the REST server when `AURUM_REST_ADDR` is not set.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3000";

/// Default request timeout applied by the REST boundary, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Upper bound for the artificial response delay, in milliseconds.
pub const MAX_RESPONSE_DELAY_MS: u64 = 10_000;

/// Maximum number of characters in a single drug name (after trimming).
pub const MAX_DRUG_NAME_CHARS: usize = 200;

/// Highest age (in years) accepted in a patient context.
pub const MAX_PATIENT_AGE: u8 = 150;
