//! Cross-document validation of driver and vehicle data extracted from MVR, DASH, and
//! insurance quote documents.
//!
//! The engine lives in [`crosscheck`]; the remaining modules carry the service surfaces
//! (configuration, telemetry, CLI and HTTP) around it.

pub mod config;
pub mod crosscheck;
pub mod error;
pub mod service;
pub mod telemetry;
