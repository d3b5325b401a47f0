//! Crate-level error types.

use std::fmt;

/// Errors produced by the driftfield crate.
#[derive(Debug)]
pub enum Error {
    /// Point positions and velocities differ in length.
    MismatchedBuffers { positions: usize, velocities: usize },
    /// A wrap volume where min does not lie strictly below max on every axis.
    InvalidBounds { axis: char, min: f32, max: f32 },
    /// A viewport resize with a zero dimension.
    InvalidViewport { width: u32, height: u32 },
    /// A chart spec rejected before layout.
    InvalidChart(String),
    /// A scene config rejected during expansion.
    InvalidConfig(String),
    /// Scene config JSON parsing/serialization failure.
    ConfigParse(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// Render backend failure.
    Render(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MismatchedBuffers {
                positions,
                velocities,
            } => {
                write!(
                    f,
                    "point buffers disagree: {positions} positions, {velocities} velocities"
                )
            }
            Self::InvalidBounds { axis, min, max } => {
                write!(f, "degenerate bounds on {axis} axis: min {min}, max {max}")
            }
            Self::InvalidViewport { width, height } => {
                write!(f, "viewport must be non-zero, got {width}x{height}")
            }
            Self::InvalidChart(msg) => write!(f, "chart error: {msg}"),
            Self::InvalidConfig(msg) => write!(f, "scene config error: {msg}"),
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Render(msg) => write!(f, "render error: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::ConfigParse(e.to_string())
    }
}
