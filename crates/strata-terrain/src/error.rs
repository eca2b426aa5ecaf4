//! Terrain generation error types.

/// Errors detected before any generation work begins.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum GenerationError {
    /// Width or height is zero.
    #[error("invalid grid dimensions {width}x{height}: both must be at least 1")]
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// A setting would make the elevation model degenerate.
    #[error("invalid terrain settings: {0}")]
    InvalidSettings(String),
}

/// An unknown map style name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown map style `{0}` (expected standard, continent, island or coast)")]
pub struct ParseStyleError(pub String);
