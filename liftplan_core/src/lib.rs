#![forbid(unsafe_code)]

//! Core domain model and generation engine for liftplan.
//!
//! This crate provides:
//! - Domain types (muscle groups, equipment, goals, plans)
//! - The exercise catalog
//! - Split scheduling, exercise selection and prescription
//! - Six-week progression and plan assembly
//! - Persistence (plan library, CSV export) and configuration

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod preferences;
pub mod random;
pub mod split;
pub mod selector;
pub mod prescription;
pub mod progression;
pub mod assembler;
pub mod engine;
pub mod store;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, default_catalog};
pub use config::Config;
pub use preferences::{load_preferences, FrequencyPolicy};
pub use random::RandomSource;
pub use split::schedule;
pub use progression::project;
pub use engine::{generate_program, ProgramGenerator};
pub use store::{JsonFileStore, MemoryStore, ProgramStore, StoredPlan};
pub use export::{plan_to_csv_string, write_plan_csv};
