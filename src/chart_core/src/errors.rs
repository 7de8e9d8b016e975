//! Error types for rendering.

use thiserror::Error;

/// Errors returned by the terminal rasterizer.
///
/// A flat price range is not an error; it is widened before scaling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The series or the requested dimensions cannot be plotted.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
