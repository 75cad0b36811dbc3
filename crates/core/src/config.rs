//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into services. Request
//! handling never reads process-wide environment variables. The helpers here take the raw
//! `Option<String>` values so binaries decide where values come from and tests need no
//! environment at all.

use crate::constants::{DEFAULT_REQUEST_TIMEOUT_SECS, MAX_RESPONSE_DELAY_MS};
use crate::knowledge_base::KnowledgeBase;
use crate::{RxError, RxResult};
use std::path::PathBuf;
use std::time::Duration;

/// Resolve the knowledge base to serve.
///
/// Without an override the built-in table is used. An override must point at a readable YAML
/// file in the [`KnowledgeBase::from_yaml_str`] format.
///
/// # Errors
///
/// Returns `RxError::InvalidInput` if the override is not a file, otherwise any load error.
pub fn resolve_knowledge_base(override_path: Option<PathBuf>) -> RxResult<KnowledgeBase> {
    match override_path {
        None => {
            let kb = KnowledgeBase::builtin();
            tracing::info!("using built-in knowledge base ({} records)", kb.len());
            Ok(kb)
        }
        Some(path) => {
            if !path.is_file() {
                return Err(RxError::InvalidInput(format!(
                    "AURUM_KNOWLEDGE_BASE override is not a file: {}",
                    path.display()
                )));
            }
            KnowledgeBase::from_yaml_file(&path)
        }
    }
}

/// Parse the artificial response delay (milliseconds) from an optional string value.
///
/// `None` or blank means no delay.
pub fn response_delay_from_env_value(value: Option<String>) -> RxResult<Duration> {
    let Some(millis) = parse_u64("AURUM_RESPONSE_DELAY_MS", value)? else {
        return Ok(Duration::ZERO);
    };

    if millis > MAX_RESPONSE_DELAY_MS {
        return Err(RxError::InvalidInput(format!(
            "AURUM_RESPONSE_DELAY_MS exceeds maximum of {MAX_RESPONSE_DELAY_MS}"
        )));
    }
    Ok(Duration::from_millis(millis))
}

/// Parse the request timeout (seconds) from an optional string value.
///
/// `None` or blank yields `DEFAULT_REQUEST_TIMEOUT_SECS`. Zero is rejected.
pub fn request_timeout_from_env_value(value: Option<String>) -> RxResult<Duration> {
    let secs = parse_u64("AURUM_REQUEST_TIMEOUT_SECS", value)?
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

    if secs == 0 {
        return Err(RxError::InvalidInput(
            "AURUM_REQUEST_TIMEOUT_SECS must be greater than zero".into(),
        ));
    }
    Ok(Duration::from_secs(secs))
}

/// Parse an optional path value; blank means unset.
pub fn path_from_env_value(value: Option<String>) -> Option<PathBuf> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn parse_u64(name: &str, value: Option<String>) -> RxResult<Option<u64>> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(|v| {
            v.parse::<u64>().map_err(|_| {
                RxError::InvalidInput(format!("{name} must be a non-negative integer, got {v:?}"))
            })
        })
        .transpose()
}
