//! # AurumRx Core
//!
//! Core business logic for the AurumRx drug interaction checker.
//!
//! This crate contains the pure interaction engine:
//! - Knowledge base of pairwise interaction records (built-in or loaded from YAML)
//! - Drug name normalisation and bidirectional pair resolution
//! - Report synthesis (risk level, narrative report and reasoning)
//! - Analysis of a candidate drug against a patient's current medications
//!
//! **No API concerns**: HTTP servers, JSON wire shapes and CLI parsing belong in `api-rest`,
//! `api-shared` and `aurum-cli`.

pub mod analysis;
pub mod config;
pub mod constants;
pub mod error;
pub mod knowledge_base;
pub mod normalize;
pub mod patient;
pub mod report;
pub mod resolver;
pub mod validation;

pub use analysis::InteractionService;
pub use aurum_types::NonEmptyText;
pub use error::{RxError, RxResult};
pub use knowledge_base::{InteractionRecord, InteractionSeverity, KnowledgeBase};
pub use patient::{AgeInput, PatientContext, RawPatientContext};
pub use report::{AnalysisResult, RiskLevel};
pub use resolver::ResolvedInteraction;
