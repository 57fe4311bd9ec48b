//! Per-dataset failures.

use std::path::PathBuf;

use thiserror::Error;

/// Why a dataset produced no report.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// An input stream could not be opened. The dataset is skipped.
    #[error("cannot open {role} input {}: {source}", path.display())]
    Open {
        /// `"kinematics"` or `"weights"`.
        role: &'static str,
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Parse failure or other core error. The dataset is aborted.
    #[error(transparent)]
    Core(#[from] ec_core::Error),

    /// A figure could not be rendered or written.
    #[error("render error: {0}")]
    Render(#[from] ec_viz_render::RenderError),
}

impl DatasetError {
    /// True for failures that happened before any event was read.
    pub fn is_open_failure(&self) -> bool {
        matches!(self, Self::Open { .. })
    }
}

impl From<serde_json::Error> for DatasetError {
    fn from(e: serde_json::Error) -> Self {
        Self::Core(ec_core::Error::Json(e))
    }
}

/// Result of a dataset pass.
pub type Result<T> = std::result::Result<T, DatasetError>;
