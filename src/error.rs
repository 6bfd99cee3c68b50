//! Error types for the board core.
//!
//! Expected runtime conditions (missing task id, empty result set) are
//! modeled as no-ops or empty values, never as errors. The variants here
//! cover the two cases the core does surface: an update that would leave a
//! task with a stage id no board defines, and a malformed board
//! configuration handed to the registry or loader.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BoardError {
    /// An update tried to set a task's status to a stage id that is not
    /// defined on any configured board.
    #[error("stage '{status}' is not defined on any configured board")]
    InvalidStage { status: String },

    /// A board configuration is structurally invalid (duplicate stage ids,
    /// duplicate board ids, empty board set).
    #[error("malformed board configuration: {reason}")]
    MalformedBoard { reason: String },
}

impl BoardError {
    pub fn invalid_stage(status: impl Into<String>) -> Self {
        Self::InvalidStage {
            status: status.into(),
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedBoard {
            reason: reason.into(),
        }
    }
}

/// Result type for board core operations.
pub type BoardResult<T> = std::result::Result<T, BoardError>;
