use std::fmt;

/// Errors from surface-normal estimation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimateError {
    /// The neighborhood has fewer points than a rank-sufficient covariance
    /// matrix needs.
    InsufficientData {
        /// Number of points supplied.
        got: usize,
        /// Required minimum.
        min: usize,
    },
}

impl fmt::Display for EstimateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientData { got, min } => {
                write!(f, "neighborhood has {} points, need at least {}", got, min)
            }
        }
    }
}

impl std::error::Error for EstimateError {}
