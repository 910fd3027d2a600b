use std::{io, path::PathBuf};

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

/// Errors that may occur while rasterizing a figure.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The output directory could not be created.
    #[error("failed to create output directory `{path}`")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The drawing backend rejected an operation.
    #[error("drawing failed: {message}")]
    Draw { message: String },
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for RenderError {
    fn from(source: DrawingAreaErrorKind<E>) -> Self {
        Self::Draw {
            message: source.to_string(),
        }
    }
}
