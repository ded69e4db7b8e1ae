//! Data models for gateway security probing
//!
//! This module contains all data structures used throughout the application.

mod scenario;

pub use scenario::{RunSummary, Scenario, ScenarioResult, ScenarioStatus};
