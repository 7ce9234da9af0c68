//! Error type for fatal contract violations.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdosError {
    #[error("requested G range on axis {axis} must be incrementing (got {min}..={max})")]
    GBoxDecreasing { axis: usize, min: i32, max: i32 },

    #[error(
        "requested G range {min}..={max} on axis {axis} is outside the sampling grid \
         (extent {extent}): need min > -{extent}/2 and max <= {extent}/2"
    )]
    GBoxOutOfBounds {
        axis: usize,
        min: i32,
        max: i32,
        extent: usize,
    },

    #[error("requested bands {band_min}+{n_bands} exceed the {available} available bands")]
    BandWindowOutOfRange {
        band_min: usize,
        n_bands: usize,
        available: usize,
    },

    #[error("frequency sweep needs at least two samples (got {0})")]
    FreqCountTooSmall(usize),

    #[error("broadening eta must be positive (got {0})")]
    NonPositiveEta(f64),

    #[error("block reconstruction failed at band offset {band_offset}: {detail}")]
    BlockReconstruct { band_offset: usize, detail: String },

    #[error("{what}: expected {expected} elements, got {got}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
