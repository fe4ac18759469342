use thiserror::Error;

/// Errors raised by grid access and controller operations.
/// All of them reject the operation and leave existing state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifeError {
    #[error("cell ({row}, {col}) is outside the {size}x{size} grid")]
    OutOfBounds { row: isize, col: isize, size: usize },
    #[error("grid size must be a positive integer (got {0})")]
    InvalidSize(usize),
    #[error("step interval must be a positive number of milliseconds (got {0})")]
    InvalidInterval(u64),
}

impl LifeError {
    pub(crate) fn out_of_bounds(row: usize, col: usize, size: usize) -> Self {
        LifeError::OutOfBounds {
            row: row as isize,
            col: col as isize,
            size,
        }
    }
}

/// Errors raised while importing or exporting the app config
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("config file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("config file holds invalid settings: {0}")]
    Invalid(#[from] LifeError),
}
