//! Error types. Only construction can fail; stepping never does.

use thiserror::Error;

/// A configuration that cannot produce a valid simulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A zero-sized axis.
    #[error("grid must be at least {min}x{min} cells, got {width}x{height}")]
    GridTooSmall {
        width: usize,
        height: usize,
        min: usize,
    },

    #[error("time step must be positive and finite, got {0}")]
    InvalidTimeStep(f32),

    /// A rate or weight that must be non-negative.
    #[error("{name} must be non-negative and finite, got {value}")]
    NegativeRate { name: &'static str, value: f32 },

    #[error("BZ diffusion rate must lie in [0, 1], got {0}")]
    DiffusionOutOfRange(f32),

    /// A count or divisor that must be at least one.
    #[error("{name} must be at least 1, got {value}")]
    NotPositive { name: &'static str, value: u64 },

    #[error("{name} must be at most 255, got {value}")]
    StateOutOfRange { name: &'static str, value: u32 },

    #[error(transparent)]
    Colormap(#[from] ColormapError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColormapError {
    #[error("unknown colormap `{name}` (available: {available})")]
    Unknown { name: String, available: String },
}
