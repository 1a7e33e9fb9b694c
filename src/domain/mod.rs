//! Core domain types and logic.

pub mod trade;
pub mod sizing;
pub mod position;
pub mod portfolio;
pub mod simulation;
pub mod summary;
pub mod sample;
pub mod config_validation;
pub mod error;
