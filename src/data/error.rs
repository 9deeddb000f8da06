use thiserror::Error;

/// Contract violations raised by the pure data layer.
///
/// Empty results (unknown site, inverted payload bounds) are never errors;
/// these variants only cover inputs that are not well-typed values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DashError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("outcome class must be 0 or 1, got {0}")]
    InvalidOutcomeClass(i64),
}

pub type Result<T> = std::result::Result<T, DashError>;
