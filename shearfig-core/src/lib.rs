//! Shear-flow velocity profiles and their stability diagnostics.
//!
//! This crate holds the pure half of the figure generator: the two
//! closed-form velocity profiles, the discrete-derivative diagnostics
//! (vorticity, curvature, Fjørtoft criterion), and the eight-panel
//! [`figure::FlowFigure`] model consumed by the rendering crates.

pub mod diagnostics;
pub mod figure;
mod profile;

pub use profile::{
    INFLECTION_X, ProfileError, SAMPLE_COUNT, ShearProfile, X_RANGE, stable_velocity,
    unstable_velocity,
};
