//! Centralized error handling for npz_vis
//!
//! Failures are scoped: a failed load leaves the current archive in place, a
//! failed export leaves the archive and selection untouched, and render
//! problems never leave the planner as errors (they become diagnostic payloads).

use thiserror::Error;

/// Main error type for npz_vis operations
#[derive(Debug, Error)]
pub enum NpzVisError {
    /// The archive could not be opened or one of its entries could not be decoded
    #[error("Error loading '{path}': {message}")]
    Load { path: String, message: String },

    /// Array name not present in the loaded archive
    #[error("Array '{name}' not found in archive")]
    ArrayNotFound { name: String },

    /// An operation needed an archive but none is loaded
    #[error("No archive loaded")]
    NoArchive,

    /// An operation needed a selected array but none is selected
    #[error("No array selected")]
    NoSelection,

    /// The CSV destination could not be written
    #[error("Error exporting data to '{path}': {source}")]
    Export {
        path: String,
        #[source]
        source: csv::Error,
    },

    /// Unexpected failure while building a render payload
    #[error("Render error: {0}")]
    Render(String),

    /// Array shape or dimension error
    #[error("Array error: {0}")]
    ArrayError(#[from] ndarray::ShapeError),

    /// Thread pool configuration error
    #[error("Thread pool error: {0}")]
    ThreadPoolError(String),

    /// I/O operation errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl NpzVisError {
    pub(crate) fn load(path: impl Into<String>, message: impl ToString) -> Self {
        Self::Load {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

/// Result type alias for npz_vis operations
pub type Result<T> = std::result::Result<T, NpzVisError>;
