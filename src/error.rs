//! Error types for the viewer.

use thiserror::Error;

use crate::mesh::{LoadError, MeshError};

#[derive(Error, Debug)]
pub enum Error {
    /// Mesh file could not be read
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Mesh data is inconsistent
    #[error("invalid mesh: {0}")]
    Mesh(#[from] MeshError),

    /// Frame could not be written to disk
    #[error("failed to save snapshot: {0}")]
    Snapshot(#[from] image::ImageError),

    /// Windowing backend failure
    #[error("window error: {0}")]
    Window(String),
}

pub type Result<T> = std::result::Result<T, Error>;
