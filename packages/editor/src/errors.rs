//! Error types for the editor

use thiserror::Error;
use tosc_lexml::{ModelError, PersistError};

/// Everything a session operation can fail with.
///
/// Display strings are the user-facing text behind the `Error: ` prefix of a
/// tool status.
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("No .tosc file is currently loaded.")]
    NoDocumentLoaded,

    #[error("No output path specified. Please provide a 'file_path'.")]
    NoOutputPath,

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Persist(#[from] PersistError),
}
