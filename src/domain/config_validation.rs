//! Configuration validation.
//!
//! Validates `[simulation]` config fields before a simulation runs. Each key
//! is checked on its own so a command-line override can stand in for it.

use crate::domain::error::CashtrackError;
use crate::domain::simulation::DEFAULT_STARTING_CASH;
use crate::domain::sizing::DEFAULT_ALLOCATION_FRACTION;
use crate::ports::config_port::ConfigPort;

pub const SIMULATION_SECTION: &str = "simulation";

fn invalid(key: &str, reason: &str) -> CashtrackError {
    CashtrackError::ConfigInvalid {
        section: SIMULATION_SECTION.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

/// A present key must parse as a number; a missing key falls back to `default`.
fn read_number(config: &dyn ConfigPort, key: &str, default: f64) -> Result<f64, CashtrackError> {
    match config.get_string(SIMULATION_SECTION, key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|_| invalid(key, &format!("expected a number, got {raw:?}"))),
    }
}

pub fn validate_starting_cash(config: &dyn ConfigPort) -> Result<(), CashtrackError> {
    let value = read_number(config, "starting_cash", DEFAULT_STARTING_CASH)?;
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid("starting_cash", "starting_cash must be positive"));
    }
    Ok(())
}

pub fn validate_allocation_fraction(config: &dyn ConfigPort) -> Result<(), CashtrackError> {
    let value = read_number(config, "allocation_fraction", DEFAULT_ALLOCATION_FRACTION)?;
    if !value.is_finite() || value <= 0.0 || value > 1.0 {
        return Err(invalid(
            "allocation_fraction",
            "allocation_fraction must be between 0 (exclusive) and 1",
        ));
    }
    Ok(())
}
