use crate::error::LifeError;
use crate::grid::MAX_GRID_SIZE;
use crate::patterns::MIN_SEEDABLE_SIZE;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAP_SIZE: usize = 29;
pub const DEFAULT_STEP_INTERVAL_MS: u64 = 1000;

/// Largest grid the size selector offers
pub const MAX_UI_SIZE: usize = 99;

/// Speeds offered by the interval selector, fastest first
pub const INTERVAL_STEPS_MS: [u64; 9] = [50, 100, 200, 300, 500, 750, 1000, 1500, 2000];

/// Simulation settings that survive a reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationSettings {
    /// Grid edge length in cells (positive)
    pub map_size: usize,
    /// Delay between generations while running (positive)
    pub step_interval_ms: u64,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            map_size: DEFAULT_MAP_SIZE,
            step_interval_ms: DEFAULT_STEP_INTERVAL_MS,
        }
    }
}

impl SimulationSettings {
    pub fn validate(&self) -> Result<(), LifeError> {
        validate_size(self.map_size)?;
        validate_interval(self.step_interval_ms)
    }

    /// Next faster entry of the interval selector
    pub fn faster_interval(&self) -> u64 {
        INTERVAL_STEPS_MS
            .iter()
            .rev()
            .copied()
            .find(|&ms| ms < self.step_interval_ms)
            .unwrap_or(INTERVAL_STEPS_MS[0])
    }

    /// Next slower entry of the interval selector
    pub fn slower_interval(&self) -> u64 {
        INTERVAL_STEPS_MS
            .iter()
            .copied()
            .find(|&ms| ms > self.step_interval_ms)
            .unwrap_or(INTERVAL_STEPS_MS[INTERVAL_STEPS_MS.len() - 1])
    }

    /// Map size adjusted by delta within the selector bounds.
    /// A size already outside the bounds never moves further out.
    pub fn adjusted_size(&self, delta: i32) -> usize {
        let lower = MIN_SEEDABLE_SIZE.min(self.map_size) as i64;
        let upper = MAX_UI_SIZE.max(self.map_size) as i64;
        (self.map_size as i64 + delta as i64).clamp(lower, upper) as usize
    }
}

pub fn validate_size(size: usize) -> Result<(), LifeError> {
    if size == 0 || size > MAX_GRID_SIZE {
        return Err(LifeError::InvalidSize(size));
    }
    Ok(())
}

pub fn validate_interval(ms: u64) -> Result<(), LifeError> {
    if ms == 0 {
        return Err(LifeError::InvalidInterval(ms));
    }
    Ok(())
}
