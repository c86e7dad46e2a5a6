//! Error types for configuration and world setup
//!
//! The simulation step itself never fails; everything that can go wrong is
//! caught when a world is built, resized or configured.

/// Errors raised while configuring or constructing a world
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// A random range was configured with missing or inverted bounds
    #[error("invalid range for `{name}`: min {min} must be finite and <= max {max}")]
    InvalidRange { name: &'static str, min: f32, max: f32 },

    /// A tunable fell outside its allowed interval
    #[error("`{name}` must be within [{min}, {max}], got {value}")]
    OutOfRange {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    /// A tunable that must be strictly positive was not
    #[error("`{name}` must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    /// Decorations need at least one color to pick from
    #[error("decoration palette is empty")]
    EmptyPalette,

    /// The canvas must have a positive area
    #[error("invalid world size {width}x{height}")]
    InvalidWorldSize { width: f32, height: f32 },

    /// Config JSON could not be parsed or written
    #[error("config JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Config file could not be read or written
    #[error("config IO error: {0}")]
    Io(#[from] std::io::Error),
}
