//! Task and patient-record core for the `carelist` binary.
//!
//! Exposed as a library so the integration tests can drive the modules
//! directly.

pub mod commands;
pub mod datetime;
pub mod models;
pub mod query;
pub mod storage;
