use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeplerError {
    #[error("Invalid eccentricity for an elliptic orbit (expected 0 <= e < 1): {0}")]
    InvalidEccentricity(f64),

    #[error("Invalid Kepler solver parameter: {0}")]
    InvalidSolverParameter(String),

    #[error("Invalid benchmark configuration: {0}")]
    InvalidBenchConfig(String),

    #[error("Invalid result file: {0}")]
    InvalidResultFile(String),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),
}

impl PartialEq for KeplerError {
    fn eq(&self, other: &Self) -> bool {
        use KeplerError::*;
        match (self, other) {
            // NaN eccentricities compare equal to each other
            (InvalidEccentricity(a), InvalidEccentricity(b)) => {
                a == b || (a.is_nan() && b.is_nan())
            }
            (InvalidSolverParameter(a), InvalidSolverParameter(b)) => a == b,
            (InvalidBenchConfig(a), InvalidBenchConfig(b)) => a == b,
            (InvalidResultFile(a), InvalidResultFile(b)) => a == b,

            // Not comparable: equal if same variant
            (IoError(_), IoError(_)) => true,
            (CsvError(_), CsvError(_)) => true,

            _ => false,
        }
    }
}
