use thiserror::Error;

/// Errors returned by maze generation and solving.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MazeError {
    /// Dimensions must be odd, at least 3, and leave room for two node cells.
    #[error("invalid maze dimensions {rows}x{cols}: rows and cols must be odd and at least 3")]
    InvalidDimensions { rows: usize, cols: usize },
    /// The goal cannot be reached from the start, or one of them is missing.
    #[error("no path from start to goal")]
    Unreachable,
    /// The step hook asked the running algorithm to stop.
    #[error("cancelled by step hook")]
    Cancelled,
    #[error("invalid solver configuration: {0}")]
    InvalidConfig(String),
    /// Q-learning hit its configured step ceiling before reaching the goal.
    #[error("training stopped after {steps} steps without reaching the goal")]
    TrainingBudgetExhausted { steps: u64 },
}

impl MazeError {
    /// Cancellation is a normal early exit rather than a failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, MazeError::Cancelled)
    }
}
