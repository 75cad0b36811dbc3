//! # API Shared
//!
//! Shared utilities and definitions for AurumRx front ends.
//!
//! Contains:
//! - JSON wire types (`wire` module) with OpenAPI schemas
//! - Translation between wire types and `aurum-core` domain types
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` and `aurum-cli` for common functionality.

pub mod health;
pub mod wire;

pub use health::HealthService;
pub use wire::*;
