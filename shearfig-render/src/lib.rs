//! Raster rendering of the flow-stability figure.
//!
//! Takes a composed [`shearfig_core::figure::FlowFigure`] and writes it as a
//! single PNG, eight panels in a 4×2 grid with the annotation conventions of
//! the printed lecture notes.

mod error;
mod raster;

pub use error::RenderError;
pub use raster::{IMAGE_SIZE, render_to_file};
