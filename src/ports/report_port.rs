//! Simulation output port trait.

use std::path::{Path, PathBuf};

use crate::domain::error::CashtrackError;
use crate::domain::simulation::SimulationResult;

/// Port for writing simulation output tables.
pub trait ReportPort {
    /// Write the daily balance and enriched trade tables under `output_dir`,
    /// returning the paths written.
    fn write(
        &self,
        result: &SimulationResult,
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>, CashtrackError>;
}
